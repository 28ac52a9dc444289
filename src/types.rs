//! Type definitions and enums for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    ///
    /// This variant represents the main menu screen of the game.
    MainMenu(MainMenuItem),
    /// In-game maze screen.
    ///
    /// This variant represents the screen where the maze is carved and then played.
    InGame,
    /// Completion summary screen.
    ///
    /// This variant represents the summary shown over the finished maze once the player reaches
    /// the exit.
    Results(ResultsItem),
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "New Game" menu option.
    NewGame,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Returns the item below this one, staying on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::NewGame | Self::Quit => Self::Quit,
        }
    }

    /// Returns the item above this one, staying on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::NewGame | Self::Quit => Self::NewGame,
        }
    }
}

/// Completion summary options.
///
/// This enumeration holds the choices offered once a maze is solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ResultsItem {
    /// "Play Again" option, starting a new maze.
    PlayAgain,
    /// "Exit" option, leaving the game.
    Exit,
}

impl ResultsItem {
    /// Returns the item below this one, staying on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::PlayAgain | Self::Exit => Self::Exit,
        }
    }

    /// Returns the item above this one, staying on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::PlayAgain | Self::Exit => Self::PlayAgain,
        }
    }
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration.
    ///
    /// This variant represents the main menu in the game, holding its number of rows.
    MainMenu(u8),
    /// Completion summary configuration.
    ///
    /// This variant represents the summary box, holding its number of rows.
    Results(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::Results(_) => "Level Complete!",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu rows for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::Results(value) => *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::NewGame);
        let in_game = Screen::InGame;
        let results = Screen::Results(ResultsItem::PlayAgain);

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::NewGame));
        assert_eq!(results, Screen::Results(ResultsItem::PlayAgain));

        assert_ne!(main_menu, in_game);
        assert_ne!(results, Screen::Results(ResultsItem::Exit));
    }

    #[test]
    fn test_main_menu_navigation() {
        assert_eq!(MainMenuItem::NewGame.next(), MainMenuItem::Quit);
        assert_eq!(MainMenuItem::Quit.next(), MainMenuItem::Quit);
        assert_eq!(MainMenuItem::Quit.previous(), MainMenuItem::NewGame);
        assert_eq!(MainMenuItem::NewGame.previous(), MainMenuItem::NewGame);
    }

    #[test]
    fn test_results_navigation() {
        assert_eq!(ResultsItem::PlayAgain.next(), ResultsItem::Exit);
        assert_eq!(ResultsItem::Exit.next(), ResultsItem::Exit);
        assert_eq!(ResultsItem::Exit.previous(), ResultsItem::PlayAgain);
        assert_eq!(ResultsItem::PlayAgain.previous(), ResultsItem::PlayAgain);
    }

    #[test]
    fn test_menu_type_repr() {
        let main_menu = MenuType::MainMenu(2);
        let results = MenuType::Results(7);

        assert_eq!(main_menu.repr(), "Main Menu");
        assert_eq!(results.repr(), "Level Complete!");
    }

    #[test]
    fn test_menu_type_value() {
        assert_eq!(MenuType::MainMenu(2).value(), 2);
        assert_eq!(MenuType::Results(7).value(), 7);
        assert_eq!(MenuType::Results(0).value(), 0);
    }

    #[test]
    fn test_debug_implementations() {
        let screen = Screen::InGame;
        let main_item = MainMenuItem::NewGame;
        let results_item = ResultsItem::Exit;

        assert_eq!(format!("{screen:?}"), "InGame");
        assert_eq!(format!("{main_item:?}"), "NewGame");
        assert_eq!(format!("{results_item:?}"), "Exit");
    }
}
