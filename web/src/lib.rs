use clap::Parser;
use sweeper_core as game;
use wasm_bindgen::prelude::*;

mod game_view;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Side length of the square board
    #[arg(long, default_value_t = 10)]
    size: game::Coord,

    /// How many mines to lay
    #[arg(short, long, default_value_t = 10)]
    mines: game::CellCount,
}

impl Args {
    /// Options come from the location hash, e.g. `#--size=16&--mines=40&-vv`
    fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        let args = hash.split(['#', '&']).filter(|arg| !arg.is_empty());
        Self::try_parse_from(std::iter::once("sweeper").chain(args))
    }

    fn board_config(&self) -> game::Result<game::BoardConfig> {
        game::BoardConfig::new(self.size, self.mines)
    }
}

/// Element the start hook mounts into, pages that only use `createBoard` leave it out
const APP_ELEMENT_ID: &str = "app";

fn mount(container: web_sys::Element, config: game::BoardConfig, seed: Option<u64>) {
    log::debug!(
        "Mounting {0}x{0} board with {1} mines",
        config.size,
        config.mines
    );
    let props = game_view::GameViewProps { config, seed };
    yew::Renderer::<game_view::GameView>::with_root_and_props(container, props).render();
}

/// Starts a new game inside `container`, a mine count that does not leave a safe tile is rejected.
#[wasm_bindgen(js_name = createBoard)]
pub fn create_board(
    container: web_sys::Element,
    size: game::Coord,
    mine_count: game::CellCount,
) -> Result<(), JsError> {
    let config = game::BoardConfig::new(size, mine_count)?;
    mount(container, config, None);
    Ok(())
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();
    let args = match Args::from_hash(&location_hash) {
        Ok(args) => args,
        Err(err) => {
            console_log::init_with_level(log::Level::Warn).expect("Error initializing logger");
            log::warn!("Ignoring invalid options in location hash: {}", err);
            return;
        }
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let Some(root) = document().get_element_by_id(APP_ELEMENT_ID) else {
        log::debug!("No id=\"{}\" element, waiting for createBoard", APP_ELEMENT_ID);
        return;
    };

    match args.board_config() {
        Ok(config) => {
            log::debug!("App started");
            mount(root, config, args.seed);
        }
        Err(err) => log::error!("Invalid board options: {}", err),
    }
}
