use self::mode_states::{Confirmed, ModeState};
use anyhow::{anyhow, Result};
use std::rc::Rc;

/// ┌──────────────── Mode Transition Flow ───────────────────┐
/// │  From          →  Event               →  To             │
/// ├─────────────────────────────────────────────────────────┤
/// │  Menu          →  Navigate(step)      →  Menu           │
/// │  Menu          →  Confirm (entry 0)   →  Playing        │
/// │  Menu          →  Confirm (entry 1)   →  Instructions   │
/// │  Instructions  →  Back                →  Menu           │
/// │  -------          ------                                │
/// │  anything else                        →  unchanged      │
/// └─────────────────────────────────────────────────────────┘
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Navigate(Step),
    Confirm,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    Instructions,
    Playing,
}

/// Menu entry that starts the game
pub const START_ENTRY: usize = 0;
/// Menu entry that opens the instructions screen
pub const INSTRUCTIONS_ENTRY: usize = 1;

/// Labels plus the highlighted one. `selected` is always a valid index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    // shared so the mode machine stays cheap to clone on every transition
    options: Rc<[String]>,
    selected: usize,
}

impl MenuState {
    pub fn new(options: Vec<String>) -> Result<Self> {
        if options.is_empty() {
            return Err(anyhow!("menu needs at least one option"));
        }
        Ok(MenuState {
            options: options.into(),
            selected: 0,
        })
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_label(&self) -> &str {
        &self.options[self.selected]
    }

    /// Wraps around both ends
    fn navigate(mut self, step: Step) -> Self {
        let count = self.options.len();
        self.selected = match step {
            Step::Previous => (self.selected + count - 1) % count,
            Step::Next => (self.selected + 1) % count,
        };
        self
    }
}

/// States live behind this mod block, the only way from one to another is
/// through the methods each state offers. There is no way to build a
/// `ModeState<Playing>` except by confirming the start entry of a menu.
mod mode_states {
    use super::{MenuState, Step, INSTRUCTIONS_ENTRY, START_ENTRY};

    #[derive(Debug, Clone, Copy)]
    pub struct Menu;
    #[derive(Debug, Clone, Copy)]
    pub struct Instructions;
    #[derive(Debug, Clone, Copy)]
    pub struct Playing;

    #[derive(Debug, Clone)]
    pub struct ModeState<S> {
        menu: MenuState,
        // type-level tag only, never read
        _state: S,
    }

    pub enum Confirmed {
        Start(ModeState<Playing>),
        Instructions(ModeState<Instructions>),
        Stay(ModeState<Menu>),
    }

    impl<S> ModeState<S> {
        pub fn menu(&self) -> &MenuState {
            &self.menu
        }
    }

    impl ModeState<Menu> {
        pub fn new(menu: MenuState) -> Self {
            ModeState {
                menu,
                _state: Menu,
            }
        }

        pub fn navigate(self, step: Step) -> Self {
            ModeState {
                menu: self.menu.navigate(step),
                _state: Menu,
            }
        }

        pub fn confirm(self) -> Confirmed {
            match self.menu.selected() {
                START_ENTRY => Confirmed::Start(ModeState {
                    menu: self.menu,
                    _state: Playing,
                }),
                INSTRUCTIONS_ENTRY => Confirmed::Instructions(ModeState {
                    menu: self.menu,
                    _state: Instructions,
                }),
                // extra labels have no screen behind them
                _ => Confirmed::Stay(self),
            }
        }
    }

    impl ModeState<Instructions> {
        pub fn back(self) -> ModeState<Menu> {
            ModeState {
                menu: self.menu,
                _state: Menu,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum GameModeMachine {
    Menu(ModeState<mode_states::Menu>),
    Instructions(ModeState<mode_states::Instructions>),
    Playing(ModeState<mode_states::Playing>),
}

impl From<ModeState<mode_states::Menu>> for GameModeMachine {
    fn from(state: ModeState<mode_states::Menu>) -> Self {
        GameModeMachine::Menu(state)
    }
}

impl From<ModeState<mode_states::Instructions>> for GameModeMachine {
    fn from(state: ModeState<mode_states::Instructions>) -> Self {
        GameModeMachine::Instructions(state)
    }
}

impl From<ModeState<mode_states::Playing>> for GameModeMachine {
    fn from(state: ModeState<mode_states::Playing>) -> Self {
        GameModeMachine::Playing(state)
    }
}

impl From<Confirmed> for GameModeMachine {
    fn from(confirmed: Confirmed) -> Self {
        match confirmed {
            Confirmed::Start(playing) => playing.into(),
            Confirmed::Instructions(instructions) => instructions.into(),
            Confirmed::Stay(menu) => menu.into(),
        }
    }
}

impl GameModeMachine {
    pub fn new(menu: MenuState) -> Self {
        GameModeMachine::Menu(ModeState::new(menu))
    }

    /// Consumes the current state. Events the current mode does not accept
    /// hand back the same state.
    pub fn transition(self, event: Event) -> Self {
        use GameModeMachine::*;
        match (self, event) {
            (Menu(state), Event::Navigate(step)) => state.navigate(step).into(),
            (Menu(state), Event::Confirm) => state.confirm().into(),
            (Instructions(state), Event::Back) => state.back().into(),
            (machine, _) => machine,
        }
    }

    pub fn navigate(self, step: Step) -> Self {
        self.transition(Event::Navigate(step))
    }

    pub fn confirm(self) -> Self {
        self.transition(Event::Confirm)
    }

    pub fn back(self) -> Self {
        self.transition(Event::Back)
    }

    pub fn mode(&self) -> GameMode {
        match self {
            GameModeMachine::Menu(_) => GameMode::Menu,
            GameModeMachine::Instructions(_) => GameMode::Instructions,
            GameModeMachine::Playing(_) => GameMode::Playing,
        }
    }

    pub fn menu(&self) -> &MenuState {
        match self {
            GameModeMachine::Menu(state) => state.menu(),
            GameModeMachine::Instructions(state) => state.menu(),
            GameModeMachine::Playing(state) => state.menu(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn menu() -> MenuState {
        MenuState::new(vec!["Start".to_string(), "Instructions".to_string()]).unwrap()
    }

    fn machine() -> GameModeMachine {
        GameModeMachine::new(menu())
    }

    #[test]
    fn starts_in_menu_on_first_entry() {
        let machine = machine();
        assert_eq!(machine.mode(), GameMode::Menu);
        assert_eq!(machine.menu().selected(), 0);
        assert_eq!(machine.menu().selected_label(), "Start");
    }

    #[test]
    fn empty_menu_is_rejected() {
        assert!(MenuState::new(Vec::new()).is_err());
    }

    #[test]
    fn navigate_up_from_top_wraps_then_opens_instructions() {
        let machine = machine().navigate(Step::Previous);
        assert_eq!(machine.menu().selected(), 1);

        let machine = machine.confirm();
        assert_eq!(machine.mode(), GameMode::Instructions);
    }

    #[test]
    fn confirm_first_entry_starts_playing() {
        assert_eq!(machine().confirm().mode(), GameMode::Playing);
    }

    #[test]
    fn back_returns_to_menu_keeping_selection() {
        let machine = machine().navigate(Step::Next).confirm().back();
        assert_eq!(machine.mode(), GameMode::Menu);
        assert_eq!(machine.menu().selected(), 1);
    }

    #[test]
    fn back_is_ignored_outside_instructions() {
        let machine = machine().navigate(Step::Next).back();
        assert_eq!(machine.mode(), GameMode::Menu);
        assert_eq!(machine.menu().selected(), 1);

        let machine = machine.navigate(Step::Next).confirm().back();
        assert_eq!(machine.mode(), GameMode::Playing);
    }

    #[test]
    fn navigate_and_confirm_are_ignored_outside_menu() {
        let instructions = machine().navigate(Step::Next).confirm();
        let after = instructions.navigate(Step::Next).confirm();
        assert_eq!(after.mode(), GameMode::Instructions);
        assert_eq!(after.menu().selected(), 1);

        let playing = machine().confirm();
        let after = playing.navigate(Step::Next).confirm().back();
        assert_eq!(after.mode(), GameMode::Playing);
        assert_eq!(after.menu().selected(), 0);
    }

    #[test]
    fn entries_without_a_screen_stay_in_menu() {
        let menu = MenuState::new(vec![
            "Start".to_string(),
            "Instructions".to_string(),
            "Credits".to_string(),
        ])
        .unwrap();
        let machine = GameModeMachine::new(menu).navigate(Step::Previous);
        assert_eq!(machine.menu().selected_label(), "Credits");
        assert_eq!(machine.confirm().mode(), GameMode::Menu);
    }

    proptest! {
        #[test]
        fn next_k_times_lands_on_k_mod_n(k in 0usize..200) {
            let mut machine = machine();
            for _ in 0..k {
                machine = machine.navigate(Step::Next);
            }
            prop_assert_eq!(machine.menu().selected(), k % 2);
        }

        #[test]
        fn selection_stays_in_range(
            steps in prop::collection::vec(any::<bool>(), 0..100),
            count in 1usize..6,
        ) {
            let options = (0..count).map(|i| format!("entry {}", i)).collect();
            let mut machine = GameModeMachine::new(MenuState::new(options).unwrap());
            for forward in steps {
                let step = if forward { Step::Next } else { Step::Previous };
                machine = machine.navigate(step);
                prop_assert!(machine.menu().selected() < count);
            }
        }
    }
}
