use std::io::{BufRead, Write};

use rand::{rngs::StdRng, SeedableRng};

use orthocubes::{
    grid::{DrawingGrid, DEFAULT_CELL_PIXELS},
    session::PuzzleSession,
    ClusterGenerator, GridCell, Verdict, ViewAxis,
};

use crate::{print_views, seed_or_random, PlayOpts};

const HELP: &str = "\
Commands:
  add X Y      mark the square in column X, row Y
  remove X Y   unmark a square
  toggle X Y   flip a square
  click PX PY  flip the square under a pixel position
  view VIEW    switch to the top, left or front view (clears the grid)
  clear        unmark every square
  show         print the grid
  check        compare the drawing with the selected view
  reveal       print the cluster and all of its views
  new          start over with a new cluster
  help         print this message
  quit         leave";

#[derive(Debug, PartialEq)]
enum Command {
    Add(GridCell),
    Remove(GridCell),
    Toggle(GridCell),
    Click(f64, f64),
    View(ViewAxis),
    Clear,
    Show,
    Check,
    Reveal,
    New,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(Command::Show);
    };
    let args: Vec<&str> = words.collect();

    let cell = || -> Result<GridCell, String> {
        match args.as_slice() {
            [x, y] => format!("{x},{y}").parse().map_err(|e| format!("{e}")),
            [xy] => xy.parse().map_err(|e| format!("{e}")),
            _ => Err(format!("`{cmd}` needs a column and a row")),
        }
    };

    let cmd = match cmd.to_ascii_lowercase().as_str() {
        "add" | "a" => Command::Add(cell()?),
        "remove" | "rm" | "r" => Command::Remove(cell()?),
        "toggle" | "t" => Command::Toggle(cell()?),
        "click" => match args.as_slice() {
            [px, py] => {
                let px = px.parse().map_err(|_| format!("bad pixel position `{px}`"))?;
                let py = py.parse().map_err(|_| format!("bad pixel position `{py}`"))?;
                Command::Click(px, py)
            }
            _ => return Err("`click` needs two pixel coordinates".to_string()),
        },
        "view" | "v" => match args.as_slice() {
            [view] => Command::View(view.parse().map_err(|e| format!("{e}"))?),
            _ => return Err("`view` needs one of: top, left, front".to_string()),
        },
        "clear" | "c" => Command::Clear,
        "show" | "s" => Command::Show,
        "check" => Command::Check,
        "reveal" => Command::Reveal,
        "new" | "n" => Command::New,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };

    Ok(cmd)
}

fn show(session: &PuzzleSession) {
    println!();
    println!("{} view", session.view());
    println!("{}", session.grid().render(session.view()));
}

pub fn play(opts: &PlayOpts) -> orthocubes::Result<()> {
    let grid = DrawingGrid::new(opts.grid, DEFAULT_CELL_PIXELS)?;
    // Every view has to fit on the grid, or the answer cannot be drawn.
    let generator = ClusterGenerator::new(opts.cluster.config().fit_to_grid(opts.grid)?)?;

    let seed = seed_or_random(opts.seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = PuzzleSession::new(generator, grid, &mut rng);

    println!("Seed: {seed}");
    println!("A new cluster of {} cubes is ready.", session.cluster().len());
    println!("{}", session.cluster());
    println!("{HELP}");
    show(&session);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;

        let command = match parse_command(&line) {
            Ok(c) => c,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        let res = match command {
            Command::Add(cell) => session.add(cell).map(|_| ()),
            Command::Remove(cell) => {
                session.remove(cell);
                Ok(())
            }
            Command::Toggle(cell) => session.toggle(cell).map(|_| ()),
            Command::Click(px, py) => session.click(px, py).map(|(cell, marked)| {
                let state = if marked { "marked" } else { "cleared" };
                println!("Square {cell} {state}");
            }),
            Command::View(view) => {
                session.select_view(view);
                show(&session);
                Ok(())
            }
            Command::Clear => {
                session.clear();
                Ok(())
            }
            Command::Show => {
                show(&session);
                Ok(())
            }
            Command::Check => {
                let report = session.report();
                println!("{}", report.verdict);
                if report.verdict == Verdict::Incorrect {
                    tracing::info!(
                        expected = ?report.expected.sorted(),
                        drawn = ?report.drawn.sorted(),
                        "Drawing did not match"
                    );
                }
                Ok(())
            }
            Command::Reveal => {
                println!("{}", session.cluster());
                print_views(session.cluster());
                Ok(())
            }
            Command::New => {
                session.restart(&mut rng);
                println!("A new cluster of {} cubes is ready.", session.cluster().len());
                println!("{}", session.cluster());
                show(&session);
                Ok(())
            }
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => break,
        };

        if let Err(e) = res {
            println!("{e}");
        }

        stdout.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cells_with_space_or_comma() {
        assert_eq!(parse_command("add 1 2"), Ok(Command::Add(GridCell::new(1, 2))));
        assert_eq!(parse_command("add 1,2"), Ok(Command::Add(GridCell::new(1, 2))));
        assert_eq!(parse_command("a (3,4)"), Ok(Command::Add(GridCell::new(3, 4))));
        assert_eq!(parse_command("rm 0 9"), Ok(Command::Remove(GridCell::new(0, 9))));
        assert_eq!(parse_command("TOGGLE 5 5"), Ok(Command::Toggle(GridCell::new(5, 5))));
    }

    #[test]
    fn missing_or_bad_cells() {
        assert!(parse_command("add").is_err());
        assert!(parse_command("add 1").is_err());
        assert!(parse_command("add 1 2 3").is_err());
        assert!(parse_command("toggle x y").is_err());
    }

    #[test]
    fn views() {
        assert_eq!(parse_command("view left"), Ok(Command::View(ViewAxis::Left)));
        assert_eq!(parse_command("v f"), Ok(Command::View(ViewAxis::Front)));
        assert!(parse_command("view").is_err());
        assert!(parse_command("view back").is_err());
        assert!(parse_command("view top left").is_err());
    }

    #[test]
    fn clicks() {
        assert_eq!(parse_command("click 25 5.5"), Ok(Command::Click(25.0, 5.5)));

        let err = parse_command("click 25 here").unwrap_err();
        assert!(err.contains("here"), "{err}");
        assert!(parse_command("click 25").is_err());
    }

    #[test]
    fn bare_words() {
        assert_eq!(parse_command(""), Ok(Command::Show));
        assert_eq!(parse_command("   "), Ok(Command::Show));
        assert_eq!(parse_command("show"), Ok(Command::Show));
        assert_eq!(parse_command("clear"), Ok(Command::Clear));
        assert_eq!(parse_command("check"), Ok(Command::Check));
        assert_eq!(parse_command("reveal"), Ok(Command::Reveal));
        assert_eq!(parse_command("new"), Ok(Command::New));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
    }

    #[test]
    fn unknown_command() {
        let err = parse_command("draw 1 2").unwrap_err();
        assert_eq!(err, "unknown command `draw`, try `help`");
    }
}
