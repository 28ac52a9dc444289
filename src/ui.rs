//! User interface rendering functions for all application screens.
//!
//! The maze is drawn on a lattice twice as fine as the grid: the cell at `(x, y)` sits on the
//! lattice point `(2x + 1, 2y + 1)`, its walls on the points next to it and the wall corners on the
//! even points. Each lattice point is one terminal cell.

use std::rc::Rc;
use std::time::Instant;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    direction::Direction,
    generator::MazeGenerator,
    grid::{Grid, Position},
    session::{Phase, MAX_DIMENSION, MIN_DIMENSION},
    types::{MainMenuItem, MenuType, ResultsItem, Screen},
    App,
};

/// Terminal rows taken below the maze by the statistics line and the tooltip.
pub(crate) const HUD_HEIGHT: u16 = 2;

/// Color of the walls.
const WALL_COLOR: Color = Color::Green;
/// Color of the carved part of the maze while it is being generated.
const VISITED_COLOR: Color = Color::Rgb(0x3e, 0xb4, 0x89);
/// Color of the cell the generator stands on.
const CURRENT_COLOR: Color = Color::Rgb(0xf7, 0x00, 0x67);
/// Blue channel of the trail colors.
const TRAIL_BLUE: u8 = 103;
/// Color of the exit cell.
const EXIT_COLOR: Color = Color::Rgb(0x00, 0xff, 0x00);
/// Color of the collectibles.
const COLLECTIBLE_COLOR: Color = Color::Rgb(0xff, 0xd7, 0x00);
/// Color of the player.
const PLAYER_COLOR: Color = Color::Cyan;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type. The
/// completion summary is drawn over the solved maze.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::InGame => in_game(app, frame)?,
        Screen::Results(item) => {
            in_game(app, frame)?;
            results(app, frame, item)?;
        }
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main menu and the completion summary.
///
/// This function creates the centered, bordered box shared by both and returns one row per menu
/// line. The area below the box is cleared first, so it can be drawn over the maze.
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let [layout] = Layout::vertical([Constraint::Length(u16::from(menu.value()) + 2)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [layout] = Layout::horizontal([Constraint::Percentage(40)])
        .flex(Flex::Center)
        .areas(layout);

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(Clear, layout);
    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(menu.value())]).split(inner_space)
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "New Game" and "Quit". It highlights the
/// currently selected option.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(2));

    let options = [
        ("New Game", item == MainMenuItem::NewGame),
        ("Quit", item == MainMenuItem::Quit),
    ];
    for ((label, active), area) in options.into_iter().zip(inner_layout.iter()) {
        frame.render_widget(option_line(label, active), *area);
    }
}

/// Renders the completion summary over the solved maze.
///
/// # Errors
///
/// This function may return errors if the player has not reached the exit.
pub(crate) fn results(app: &App, frame: &mut Frame, item: ResultsItem) -> Result<()> {
    let summary = app
        .session
        .player()
        .summary()
        .ok_or_eyre("failed to retrieve the summary of a solved maze")?;

    let content_style = Style::default().fg(Color::Green);
    let lines = [
        Line::styled(
            format!("Time: {:.2}s", summary.elapsed.as_secs_f64()),
            content_style,
        ),
        Line::styled(
            format!(
                "Collected: {}/{}",
                summary.collected,
                app.session.collectibles().placed()
            ),
            content_style,
        ),
        Line::styled(format!("Accuracy: {:.2}%", summary.accuracy), content_style),
        Line::styled(format!("Moves: {}", summary.moves), content_style),
        Line::raw(""),
        option_line("Play Again", item == ResultsItem::PlayAgain),
        option_line("Exit", item == ResultsItem::Exit),
    ];

    let inner_layout = init_menu(frame, MenuType::Results(7));
    for (line, area) in lines.into_iter().zip(inner_layout.iter()) {
        frame.render_widget(line.centered(), *area);
    }

    Ok(())
}

/// Returns a menu option, highlighted when it is the active one.
fn option_line(label: &str, active: bool) -> Line<'_> {
    let style = if active {
        Style::default().fg(Color::White).bg(Color::Green)
    } else {
        Style::default().fg(Color::Green)
    };

    Line::styled(label, style).centered()
}

/// Renders the in-game screen with the maze, the statistics line and the key tooltip.
///
/// While the maze is being carved this shows the carved cells, the backtracking trail shaded by
/// depth and the generator's current cell. Once carved it shows the exit, the collectibles and the
/// player instead.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout retrieval.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let grid = app.session.grid();
    let lattice_cols = lattice_len(grid.cols());
    let lattice_rows = lattice_len(grid.rows());

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(1), // Statistics line
        Constraint::Length(1), // Tooltip block
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let stats_area = *overall_layout
        .get(1)
        .ok_or_eyre("failed to get statistics area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let main_layout = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(u16::try_from(lattice_rows)?),
        Constraint::Min(0),
    ])
    .split(maze_content_area);

    let maze_area = main_layout
        .get(1)
        .ok_or_eyre("failed to get maze area from layout")?;

    let space = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(u16::try_from(lattice_cols)?),
        Constraint::Min(0),
    ])
    .split(*maze_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    let layers = MazeLayers::collect(app, lattice_cols, lattice_rows)?;

    let half_width = (f64::from(space.width) - 1.) / 2.;
    let half_height = (f64::from(space.height) - 1.) / 2.;
    let maze = Canvas::default()
        .x_bounds([-half_width, half_width])
        .y_bounds([-half_height, half_height])
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &layers.walls,
                color: WALL_COLOR,
            });
            ctx.draw(&Points {
                coords: &layers.visited,
                color: VISITED_COLOR,
            });
            for (index, coords) in layers.trail.iter().enumerate() {
                ctx.draw(&Points {
                    coords: std::slice::from_ref(coords),
                    color: Color::Rgb(MazeGenerator::trail_shade(index), 0, TRAIL_BLUE),
                });
            }
            ctx.draw(&Points {
                coords: &layers.current,
                color: CURRENT_COLOR,
            });
            ctx.draw(&Points {
                coords: &layers.exit,
                color: EXIT_COLOR,
            });
            for &(x, y) in &layers.collectibles {
                ctx.print(x, y, Line::styled("*", Style::default().fg(COLLECTIBLE_COLOR)));
            }
            for &(x, y) in &layers.player {
                ctx.print(x, y, Line::styled("@", Style::default().fg(PLAYER_COLOR)));
            }
        });

    frame.render_widget(maze, space);

    let stats = Line::styled(stats_text(app), Style::default().fg(Color::Green)).centered();
    frame.render_widget(stats, stats_area);

    // Render tooltip as a block at the bottom with top border
    let tooltip_block = Block::bordered()
        .title("(arrows/wasd/hjkl) move / (space) reset / (+/-) resize / (esc) menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    Ok(())
}

/// Canvas coordinates of everything drawn on the maze.
///
/// The carving layers are only filled while the maze is being generated, the playing layers only
/// once it is complete.
#[derive(Debug, Default)]
struct MazeLayers {
    /// Wall segments and corners.
    walls: Vec<(f64, f64)>,
    /// Carved cells and the passages between them.
    visited: Vec<(f64, f64)>,
    /// Backtracking trail, oldest cell first.
    trail: Vec<(f64, f64)>,
    /// Cell the generator stands on.
    current: Vec<(f64, f64)>,
    /// Exit cell.
    exit: Vec<(f64, f64)>,
    /// Collectibles still on the maze.
    collectibles: Vec<(f64, f64)>,
    /// Player.
    player: Vec<(f64, f64)>,
}

impl MazeLayers {
    /// Pre-computes the screen coordinates of every layer, so errors surface before the canvas
    /// closure runs.
    ///
    /// # Errors
    ///
    /// This function may return errors if a coordinate does not fit in a terminal dimension.
    fn collect(app: &App, lattice_cols: usize, lattice_rows: usize) -> Result<Self> {
        let grid = app.session.grid();
        let to_screen = |points: &[(usize, usize)]| {
            lattice_to_screen_coords(points, lattice_cols, lattice_rows)
        };

        let mut layers = Self {
            walls: to_screen(&wall_points(grid))?,
            ..Self::default()
        };

        if let Some(generator) = app.session.generator() {
            layers.visited = to_screen(&passage_points(grid))?;
            layers.trail = to_screen(
                &generator
                    .trail()
                    .iter()
                    .copied()
                    .map(cell_center)
                    .collect::<Vec<_>>(),
            )?;
            layers.current = to_screen(&[cell_center(generator.current())])?;
        } else {
            layers.exit = to_screen(&[cell_center(grid.exit())])?;
            layers.collectibles = to_screen(
                &app.session
                    .collectibles()
                    .remaining()
                    .map(cell_center)
                    .collect::<Vec<_>>(),
            )?;
            layers.player = to_screen(&[cell_center(app.session.player().position())])?;
        }

        Ok(layers)
    }
}

/// Returns the text of the statistics line.
///
/// The timer only appears once the player has moved, since it starts with the first input.
fn stats_text(app: &App) -> String {
    let session = &app.session;
    if let Some(generator) = session.generator() {
        let passages = session.grid().cells().len().saturating_sub(1);
        return format!("Carving the maze: {}/{passages} passages", generator.carved());
    }

    let player = session.player();
    let mut parts = Vec::new();
    if player.has_started() {
        parts.push(format!(
            "Time: {:.2}s",
            player.elapsed(Instant::now()).as_secs_f64()
        ));
    }
    parts.push(format!(
        "Collected: {}/{}",
        player.collected(),
        session.collectibles().placed()
    ));
    parts.push(format!("Accuracy: {:.2}%", player.accuracy()));
    parts.push(format!("Moves: {}", player.move_count()));
    if session.phase() == Phase::Playing && !player.has_started() {
        parts.push("Move to start the clock".to_owned());
    }

    parts.join("  ")
}

/// Returns the grid dimensions whose lattice fills a terminal of the given size.
///
/// Dimensions stay between [`MIN_DIMENSION`] and [`MAX_DIMENSION`], so the maze may overflow very
/// small terminals and leave a margin on very large ones.
pub(crate) fn fit_grid(width: u16, height: u16) -> (usize, usize) {
    let cols = usize::from(width.saturating_sub(1) / 2);
    let rows = usize::from(height.saturating_sub(HUD_HEIGHT + 1) / 2);

    (
        cols.clamp(MIN_DIMENSION, MAX_DIMENSION),
        rows.clamp(MIN_DIMENSION, MAX_DIMENSION),
    )
}

/// Returns the number of lattice points along a grid dimension.
const fn lattice_len(cells: usize) -> usize {
    2 * cells + 1
}

/// Returns the lattice point at the center of a cell.
const fn cell_center(position: Position) -> (usize, usize) {
    (2 * position.x + 1, 2 * position.y + 1)
}

/// Returns the lattice point between a cell center and its side in `direction`.
fn side_point(center: (usize, usize), direction: Direction) -> Option<(usize, usize)> {
    direction
        .step_from(Position::new(center.0, center.1))
        .map(|point| (point.x, point.y))
}

/// Collects the lattice points covered by walls.
///
/// The corners between cells are always walls; the sides are walls while the matching cell wall is
/// standing.
pub(crate) fn wall_points(grid: &Grid) -> Vec<(usize, usize)> {
    let mut points = Vec::new();

    for row in 0..=grid.rows() {
        for col in 0..=grid.cols() {
            points.push((2 * col, 2 * row));
        }
    }
    for cell in grid.cells() {
        let center = cell_center(cell.position());
        points.extend(
            Direction::ALL
                .into_iter()
                .filter(|direction| cell.walls().has(*direction))
                .filter_map(|direction| side_point(center, direction)),
        );
    }

    points
}

/// Collects the lattice points of the visited cells and of the passages between them.
pub(crate) fn passage_points(grid: &Grid) -> Vec<(usize, usize)> {
    let mut points = Vec::new();

    for cell in grid.cells().iter().filter(|cell| cell.visited()) {
        let center = cell_center(cell.position());
        points.push(center);
        points.extend(
            Direction::ALL
                .into_iter()
                .filter(|direction| !cell.walls().has(*direction))
                .filter_map(|direction| side_point(center, direction)),
        );
    }

    points
}

/// Transforms lattice coordinates into canvas coordinates centered on the origin.
///
/// Lattice rows grow downwards while canvas rows grow upwards, so rows are mirrored.
///
/// # Errors
///
/// This function may return errors if a coordinate does not fit in a terminal dimension.
pub(crate) fn lattice_to_screen_coords(
    points: &[(usize, usize)],
    lattice_cols: usize,
    lattice_rows: usize,
) -> Result<Vec<(f64, f64)>> {
    let cols_n = f64::from(u16::try_from(lattice_cols)?);
    let rows_n = f64::from(u16::try_from(lattice_rows)?);

    points
        .iter()
        .map(|&(col, row)| {
            // Row transformation: coordinate[i] = (n - 1) / 2 - i
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(row)?);

            // Column transformation: coordinate[i] = i - (n - 1) / 2
            let screen_x = f64::from(u16::try_from(col)?) - (cols_n - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use clap::Parser as _;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::Config;

    /// Creates a test app on a small maze that carves everything in one frame.
    fn create_test_app() -> App {
        let config = Config::try_parse_from([
            "mazecarver",
            "--cols",
            "5",
            "--rows",
            "4",
            "--seed",
            "3",
            "--frame-delay-ms",
            "0",
            "--steps-per-frame",
            "500",
        ])
        .expect("test arguments are valid");
        App::new(config)
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Returns every symbol of the rendered buffer as one string.
    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    /// Walks the player from the origin to the exit of the carved maze.
    fn solve(app: &mut App) {
        for direction in app.session.grid().solution() {
            app.move_player(direction);
        }
    }

    #[test]
    fn test_draw_main_menu() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing main menu should succeed");
        let text = rendered(&terminal);
        assert!(text.contains("New Game"), "main menu should list new game");
        assert!(text.contains("Quit"), "main menu should list quit");
    }

    #[test]
    fn test_main_menu_quit_selected() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            main_menu(frame, MainMenuItem::Quit);
        });

        assert!(
            result.is_ok(),
            "rendering main menu with quit selected should succeed"
        );
    }

    #[test]
    fn test_init_menu_rows() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, MenuType::MainMenu(2));
            assert_eq!(layout.len(), 2, "main menu should have 2 items");
            let layout = init_menu(frame, MenuType::Results(7));
            assert_eq!(layout.len(), 7, "summary should have 7 rows");
        });

        assert!(result.is_ok(), "initializing menus should succeed");
    }

    #[test]
    fn test_draw_in_game_while_generating() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.new_game();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing the carving maze should succeed");
        assert!(
            rendered(&terminal).contains("Carving the maze: 0/19 passages"),
            "statistics should show carving progress"
        );
    }

    #[test]
    fn test_draw_in_game_after_generation() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.new_game();
        app.advance_generation().expect("no snapshot requested");

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing the carved maze should succeed");
        let text = rendered(&terminal);
        assert!(text.contains('@'), "player should be drawn");
        assert!(text.contains("Accuracy: 100.00%"), "accuracy starts perfect");
        assert!(!text.contains("Time:"), "timer is hidden before the first move");
    }

    #[test]
    fn test_draw_results_after_solving() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.new_game();
        app.advance_generation().expect("no snapshot requested");

        solve(&mut app);

        assert_eq!(app.screen, Screen::Results(ResultsItem::PlayAgain));
        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing the summary should succeed");
        let text = rendered(&terminal);
        assert!(text.contains("Level Complete!"), "summary title should be drawn");
        assert!(text.contains("Play Again"), "summary should offer a new maze");
        assert!(text.contains("Accuracy: 100.00%"), "a direct walk is accurate");
    }

    #[test]
    fn test_results_without_summary_error() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let results_result = results(&app, frame, ResultsItem::PlayAgain);
            assert!(
                results_result.is_err(),
                "summary should fail before the exit is reached"
            );
        });

        assert!(
            result.is_ok(),
            "terminal drawing should succeed even if results fails"
        );
    }

    #[test]
    fn test_fit_grid() {
        assert_eq!(fit_grid(41, 25), (20, 11));
        assert_eq!(fit_grid(80, 24), (39, 10));
        assert_eq!(fit_grid(3, 3), (2, 2), "tiny terminals keep the minimum size");
        assert_eq!(
            fit_grid(1000, 600),
            (MAX_DIMENSION, MAX_DIMENSION),
            "huge terminals keep the maximum size"
        );
    }

    #[test]
    fn test_wall_points_closed_grid() {
        let grid = Grid::build(2, 2);

        let walls: BTreeSet<_> = wall_points(&grid).into_iter().collect();

        assert_eq!(walls.len(), 25 - 4, "everything but the cell centers is a wall");
        assert!(!walls.contains(&(1, 1)));
        assert!(walls.contains(&(2, 1)));
    }

    #[test]
    fn test_wall_points_carved_grid() {
        let mut grid = Grid::build(2, 2);
        grid.remove_wall_between(Position::new(0, 0), Position::new(1, 0))
            .expect("cells are adjacent");

        let walls: BTreeSet<_> = wall_points(&grid).into_iter().collect();

        assert_eq!(walls.len(), 20);
        assert!(!walls.contains(&(2, 1)), "the carved side is open");
    }

    #[test]
    fn test_lattice_to_screen_coords() {
        let coords = lattice_to_screen_coords(&[(0, 0), (2, 1), (4, 2)], 5, 3)
            .expect("coordinates fit");

        assert_eq!(coords, vec![(-2.0, 1.0), (0.0, 0.0), (2.0, -1.0)]);
    }
}
