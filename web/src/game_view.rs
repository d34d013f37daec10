use crate::game;
use crate::utils::js_random_seed;
use game::{StatusReadout, StatusSink, TileId, TileStatus};
use yew::prelude::*;

/// Forwards status changes to the log, the view itself polls the handle.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LogStatus;

impl StatusSink for LogStatus {
    fn publish(&mut self, status: &StatusReadout) {
        log::info!("{}", status);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum TileMsg {
    Reveal(TileId),
    Mark(TileId),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    TileEvent(TileMsg),
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    id: TileId,
    status: TileStatus,
    value: u8,
    callback: Callback<TileMsg>,
}

/// Text shown on a tile: numbers above zero, nothing otherwise.
fn tile_text(status: TileStatus, value: u8) -> String {
    match status {
        TileStatus::Number if value > 0 => value.to_string(),
        _ => String::new(),
    }
}

fn tile_classes(status: TileStatus, value: u8) -> Classes {
    classes!(
        "tile",
        status.name(),
        status.is_revealed().then_some("revealed"),
        (status == TileStatus::Number).then(|| format!("num-{}", value))
    )
}

/// Status line gets `final` once the game is decided.
fn status_classes(status: StatusReadout) -> Classes {
    classes!("status", status.is_final().then_some("final"))
}

#[function_component(Tile)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps {
        id,
        status,
        value,
        callback,
    } = props.clone();
    let class = tile_classes(status, value);

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| callback.emit(TileMsg::Reveal(id)))
    };

    let oncontextmenu = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        callback.emit(TileMsg::Mark(id));
    });

    html! {
        <div {class} data-id={id.to_string()} data-status={status.name()} {onclick} {oncontextmenu}>
            {tile_text(status, value)}
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameViewProps {
    pub config: game::BoardConfig,
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct GameView {
    handle: game::BoardHandle<LogStatus>,
}

impl GameView {
    fn reveal(&mut self, id: TileId) -> bool {
        self.handle.reveal(id).map_or_else(
            |err| {
                log::debug!("ignored reveal at {}: {}", id, err);
                false
            },
            |outcome| outcome.has_update(),
        )
    }

    fn mark(&mut self, id: TileId) -> bool {
        self.handle.mark(id).map_or_else(
            |err| {
                log::debug!("ignored mark at {}: {}", id, err);
                false
            },
            |outcome| outcome.has_update(),
        )
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameViewProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameViewProps { config, seed } = ctx.props().clone();
        let seed = seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);
        Self {
            handle: game::BoardHandle::create(config, seed, LogStatus),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;
        use TileMsg::*;

        match msg {
            TileEvent(Reveal(id)) => {
                log::debug!("reveal tile: {}", id);
                self.reveal(id)
            }
            TileEvent(Mark(id)) => {
                log::debug!("mark tile: {}", id);
                self.mark(id)
            }
            NewGame => {
                self.handle.new_game(js_random_seed());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let board = self.handle.board();
        let status = self.handle.status();
        let style = format!("--size: {}", board.size());
        let status_class = status_classes(status);
        let callback = ctx.link().callback(Msg::TileEvent);
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <div id="board-container" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <div class={status_class}>
                    <span class="status-text">{status.label()}</span>
                    <span class="status-score">{status.value().to_string()}</span>
                    <button class="new-game" onclick={cb_new_game}>{"New game"}</button>
                </div>
                <section class="board" {style} data-state={board.state().name()}>
                    {
                        for board.tiles().map(|tile| {
                            let id = tile.id();
                            html! {
                                <Tile
                                    key={id.to_string()}
                                    {id}
                                    status={tile.status()}
                                    value={tile.value()}
                                    callback={callback.clone()}
                                />
                            }
                        })
                    }
                </section>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_positive_numbers_have_text() {
        assert_eq!(tile_text(TileStatus::Number, 3), "3");
        assert_eq!(tile_text(TileStatus::Number, 0), "");
        assert_eq!(tile_text(TileStatus::Hidden, 0), "");
        assert_eq!(tile_text(TileStatus::Marked, 0), "");
        assert_eq!(tile_text(TileStatus::Mine, 0), "");
    }

    #[test]
    fn opened_tiles_are_styled_as_revealed() {
        let number = tile_classes(TileStatus::Number, 2);
        assert!(number.contains("revealed"));
        assert!(number.contains("num-2"));
        assert!(tile_classes(TileStatus::Mine, 0).contains("revealed"));

        for status in [TileStatus::Hidden, TileStatus::Marked] {
            let classes = tile_classes(status, 0);
            assert!(classes.contains(status.name()));
            assert!(!classes.contains("revealed"));
        }
    }

    #[test]
    fn status_line_is_final_only_after_the_game_ends() {
        assert!(!status_classes(StatusReadout::MinesLeft(3)).contains("final"));
        assert!(!status_classes(StatusReadout::MinesLeft(-1)).contains("final"));
        assert!(status_classes(StatusReadout::Won).contains("final"));
        assert!(status_classes(StatusReadout::Lost).contains("final"));
    }
}
