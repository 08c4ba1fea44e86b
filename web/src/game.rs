use crate::utils::*;
use clap::Args;
use core::time::Duration;
use game::ToCellIndex;
use genius_core as game;
use gloo::timers::callback::Timeout;
use yew::html::Scope;
use yew::prelude::*;

/// Backs each engine continuation with a browser timeout.
pub(crate) struct TimeoutScheduler {
    link: Scope<GameView>,
    timeouts: Vec<(game::Continuation, Timeout)>,
}

impl TimeoutScheduler {
    fn new(link: Scope<GameView>) -> Self {
        Self {
            link,
            timeouts: Vec::new(),
        }
    }

    /// Forgets the handle of a timeout that already fired.
    fn forget(&mut self, continuation: &game::Continuation) {
        self.timeouts.retain(|(pending, _)| pending != continuation);
    }

    /// Drops every outstanding timeout, which clears it on the browser side.
    fn cancel_all(&mut self) {
        if !self.timeouts.is_empty() {
            log::debug!("cancelling {} pending timeouts", self.timeouts.len());
        }
        self.timeouts.clear();
    }
}

impl game::Scheduler for TimeoutScheduler {
    fn schedule(&mut self, delay: Duration, continuation: game::Continuation) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let link = self.link.clone();
        let timeout = Timeout::new(millis, move || link.send_message(Msg::Resume(continuation)));
        self.timeouts.push((continuation, timeout));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    NewGame,
    Press(game::CellIndex),
    Resume(game::Continuation),
}

fn status_line(snapshot: &game::EngineSnapshot) -> &'static str {
    use game::Phase::*;
    match snapshot.phase {
        Idle => "Press start",
        Playing => "Watch closely...",
        AwaitingInput => "Your turn",
        RoundComplete => "Nice!",
        GameOver => "Wrong cell! You missed the sequence.",
    }
}

fn cell_classes(lit: bool, locked: bool) -> Classes {
    let mut class = classes!("cell");
    if lit {
        class.push("lit");
    }
    if locked {
        class.push("locked");
    }
    class
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: game::CellIndex,
    #[prop_or_default]
    lit: bool,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CellIndex>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        index,
        lit,
        locked,
        callback,
    } = props.clone();

    let class = cell_classes(lit, locked);
    let onclick = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        if locked {
            log::trace!("cell {} pressed while locked", index);
            return;
        }
        log::trace!("cell {} pressed", index);
        callback.emit(index);
    });

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

pub(crate) struct GameView {
    engine: game::GameEngine,
    scheduler: TimeoutScheduler,
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let mut engine = game::GameEngine::with_seed(game::GameConfig::default(), seed)
            .expect("default config must be valid");
        let mut scheduler = TimeoutScheduler::new(ctx.link().clone());
        engine.start_game(&mut scheduler);

        Self { engine, scheduler }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            NewGame => {
                log::debug!("new game");
                self.scheduler.cancel_all();
                self.engine.start_game(&mut self.scheduler);
                true
            }
            Press(cell) => match self.engine.handle_input(cell, &mut self.scheduler) {
                Ok(outcome) => {
                    log::debug!("press {}: {:?}", cell, outcome);
                    outcome.has_update()
                }
                Err(err) => {
                    log::warn!("press {} rejected: {}", cell, err);
                    false
                }
            },
            Resume(continuation) => {
                self.scheduler.forget(&continuation);
                self.engine
                    .resume(continuation, &mut self.scheduler)
                    .has_update()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let snapshot = self.engine.snapshot();
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });

        if snapshot.is_game_over() {
            return html! {
                <div class="genius game-over">
                    <h2>{status_line(&snapshot)}</h2>
                    <p>{format!("Score: {}", snapshot.score)}</p>
                    <button onclick={cb_new_game}>{"Restart"}</button>
                </div>
            };
        }

        let size = snapshot.grid_size;
        let locked = !snapshot.accepts_input();
        let callback = ctx.link().callback(Press);

        html! {
            <div class="genius">
                <h1>{"Genius"}</h1>
                <nav>
                    <aside>{format!("Score: {}", snapshot.score)}</aside>
                    <span><button onclick={cb_new_game}>{"New game"}</button></span>
                    <aside>{format!("Level: {}", snapshot.level_number())}</aside>
                </nav>
                <small>{status_line(&snapshot)}</small>
                <table class={(!locked).then_some("playable")}>
                    {
                        for (0..size).map(|row| html! {
                            <tr>
                                {
                                    for (0..size).map(|col| {
                                        let index = (col, row).to_cell_index(size);
                                        let lit = snapshot.is_highlighted(index);
                                        let callback = callback.clone();
                                        html! {
                                            <CellView {index} {lit} {locked} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            </div>
        }
    }
}
