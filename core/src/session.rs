use crate::*;

/// One game session: owns the board, accepts the player's moves and reports status changes to a sink.
#[derive(Clone, Debug)]
pub struct BoardHandle<S> {
    board: Board,
    status: StatusReadout,
    sink: S,
}

impl<S: StatusSink> BoardHandle<S> {
    /// Starts a new game with a random layout.
    pub fn create(config: BoardConfig, seed: u64, sink: S) -> Self {
        Self::from_board(Board::generate(config, seed), sink)
    }

    /// Starts a game on a prepared board.
    pub fn from_board(board: Board, mut sink: S) -> Self {
        let status = StatusReadout::MinesLeft(board.mines_left());
        sink.publish(&status);
        Self {
            board,
            status,
            sink,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.board.state()
    }

    /// Latest readout that was published.
    pub fn status(&self) -> StatusReadout {
        self.status
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Replaces the board with a fresh layout of the same shape.
    pub fn new_game(&mut self, seed: u64) {
        self.board = Board::generate(self.board.config(), seed);
        log::debug!("New game, seed {}", seed);
        self.publish(StatusReadout::MinesLeft(self.board.mines_left()));
    }

    /// Opens a tile and checks whether that ended the game.
    pub fn reveal(&mut self, id: TileId) -> Result<RevealOutcome> {
        self.check_accepting()?;

        let outcome = self.board.reveal_tile(id.coords())?;
        match self.board.check_game_end() {
            GameState::InProgress => {}
            GameState::Won => self.publish(StatusReadout::Won),
            GameState::Lost => self.publish(StatusReadout::Lost),
        }
        Ok(outcome)
    }

    /// Toggles the mark on a tile and reports the new remaining-mine count.
    pub fn mark(&mut self, id: TileId) -> Result<MarkOutcome> {
        self.check_accepting()?;

        let outcome = self.board.mark(id.coords())?;
        if outcome.has_update() {
            self.publish(StatusReadout::MinesLeft(self.board.mines_left()));
        }
        Ok(outcome)
    }

    pub fn reveal_str(&mut self, id: &str) -> Result<RevealOutcome> {
        self.reveal(id.parse()?)
    }

    pub fn mark_str(&mut self, id: &str) -> Result<MarkOutcome> {
        self.mark(id.parse()?)
    }

    fn check_accepting(&self) -> Result<()> {
        if self.board.is_final() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn publish(&mut self, status: StatusReadout) {
        self.status = status;
        self.sink.publish(&status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn handle(size: Coord, mines: &[Coord2]) -> BoardHandle<Vec<StatusReadout>> {
        BoardHandle::from_board(Board::from_mine_coords(size, mines).unwrap(), Vec::new())
    }

    #[test]
    fn create_publishes_initial_mine_count() {
        let handle = BoardHandle::create(BoardConfig::default(), 9, Vec::new());
        assert_eq!(handle.sink(), &[StatusReadout::MinesLeft(10)]);
        assert_eq!(handle.state(), GameState::InProgress);
    }

    #[test]
    fn marking_reports_remaining_mines() {
        let mut handle = handle(3, &[(0, 0), (2, 2)]);

        handle.mark_str("0-0").unwrap();
        handle.mark_str("1-1").unwrap();
        handle.mark_str("1-1").unwrap();

        assert_eq!(
            handle.sink(),
            &[
                StatusReadout::MinesLeft(2),
                StatusReadout::MinesLeft(1),
                StatusReadout::MinesLeft(0),
                StatusReadout::MinesLeft(1),
            ]
        );
        assert_eq!(handle.status(), StatusReadout::MinesLeft(1));
    }

    #[test]
    fn winning_reveal_reports_win_and_locks_board() {
        let mut handle = handle(3, &[(0, 0)]);

        assert_eq!(handle.reveal_str("2-2").unwrap(), RevealOutcome::Revealed);

        assert_eq!(handle.state(), GameState::Won);
        assert_eq!(handle.status(), StatusReadout::Won);
        assert_eq!(handle.mark(TileId::new(0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(handle.reveal(TileId::new(0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(handle.board().tile((0, 0)).unwrap().status(), TileStatus::Hidden);
    }

    #[test]
    fn losing_reveal_reports_loss_and_opens_mines() {
        let mut handle = handle(3, &[(0, 0), (2, 2)]);
        handle.mark_str("2-2").unwrap();

        assert_eq!(handle.reveal_str("0-0").unwrap(), RevealOutcome::HitMine);

        assert_eq!(handle.state(), GameState::Lost);
        assert_eq!(handle.sink().last(), Some(&StatusReadout::Lost));
        assert_eq!(handle.board().tile((2, 2)).unwrap().status(), TileStatus::Mine);
        assert_eq!(handle.reveal_str("1-1"), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn non_final_reveal_keeps_status() {
        let mut handle = handle(3, &[(0, 0)]);

        handle.reveal_str("1-1").unwrap();

        assert_eq!(handle.sink(), &[StatusReadout::MinesLeft(1)]);
        assert_eq!(handle.state(), GameState::InProgress);
    }

    #[test]
    fn bad_ids_are_errors_and_change_nothing() {
        let mut handle = handle(3, &[(0, 0)]);
        let before = handle.board().clone();

        assert_eq!(handle.reveal_str("x"), Err(GameError::InvalidTileId));
        assert_eq!(handle.mark_str("1_1"), Err(GameError::InvalidTileId));
        assert_eq!(handle.reveal_str("9-9").unwrap(), RevealOutcome::NoChange);
        assert_eq!(handle.board(), &before);
    }

    #[test]
    fn new_game_resets_after_terminal_state() {
        let mut handle = handle(3, &[(0, 0)]);
        handle.reveal_str("0-0").unwrap();
        assert!(handle.board().is_final());

        handle.new_game(5);

        assert_eq!(handle.state(), GameState::InProgress);
        assert_eq!(handle.status(), StatusReadout::MinesLeft(1));
        assert_eq!(handle.board().config(), BoardConfig::new_unchecked(3, 1));
        assert!(handle.reveal_str("1-1").is_ok());
    }
}
