use clap::Parser;
use grid_life::config::{
    DEFAULT_BASE_SIMULATION_DELAY_MS, DEFAULT_TILE_SIZE, MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH,
    MIN_SPEED_MULTIPLIER,
};
use grid_life::{DisplayBounds, GameConfig, Pattern, Phase, Session, Topology};
use std::str::FromStr;
use std::time::Duration;

/// A pattern to seed, written NAME@COLUMN,ROW
#[derive(Debug, Clone)]
struct Placement {
    pattern: Pattern,
    column: usize,
    row: usize,
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, at) = s
            .split_once('@')
            .ok_or_else(|| format!("expected NAME@COLUMN,ROW, got {:?}", s))?;
        let (column, row) = at
            .split_once(',')
            .ok_or_else(|| format!("expected COLUMN,ROW after '@', got {:?}", at))?;
        Ok(Self {
            pattern: name.parse().map_err(|e: grid_life::Error| e.to_string())?,
            column: column.trim().parse().map_err(|e| format!("bad column: {}", e))?,
            row: row.trim().parse().map_err(|e| format!("bad row: {}", e))?,
        })
    }
}

/// Headless Game of Life runner
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Field width in screen units
    #[arg(long, default_value_t = MIN_FIELD_WIDTH)]
    width: u32,
    /// Field height in screen units
    #[arg(long, default_value_t = MIN_FIELD_HEIGHT)]
    height: u32,
    /// Side of one cell in screen units
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u32,
    /// Edge behavior: bounded or toroidal
    #[arg(long, default_value_t = Topology::Bounded)]
    topology: Topology,
    /// Simulation speed multiplier (1 - 200)
    #[arg(long, default_value_t = MIN_SPEED_MULTIPLIER)]
    speed: u32,
    /// Pattern to seed, e.g. glider@4,4 (repeatable)
    #[arg(long = "pattern", value_name = "NAME@COLUMN,ROW")]
    patterns: Vec<Placement>,
    /// Stop after this many generations even if the field is still changing
    #[arg(long)]
    max_generations: Option<u64>,
    /// Advance as fast as possible instead of pacing generations
    #[arg(long)]
    no_delay: bool,
    #[arg(long, default_value_t = 1920)]
    display_width: u32,
    #[arg(long, default_value_t = 1080)]
    display_height: u32,
    /// Reject out-of-range settings instead of falling back to defaults
    #[arg(long)]
    strict: bool,
}

fn seed(session: &mut Session, placements: &[Placement]) -> grid_life::Result<()> {
    if !placements.is_empty() {
        for p in placements {
            session.place(p.pattern, p.column, p.row)?;
        }
        return Ok(());
    }

    // Nothing requested: a glider, plus a glider gun when it fits
    let width = session.engine().width_cells();
    let height = session.engine().height_cells();
    session.place(Pattern::Glider, width / 4, height / 4)?;
    let (gun_width, gun_height) = Pattern::GosperGliderGun.size();
    if width / 5 + gun_width <= width && height / 2 + gun_height <= height {
        session.place(Pattern::GosperGliderGun, width / 5, height / 2)?;
    }
    Ok(())
}

fn run(args: Args) -> grid_life::Result<()> {
    let display = DisplayBounds {
        width: args.display_width,
        height: args.display_height,
    };
    let config = GameConfig {
        field_width: args.width,
        field_height: args.height,
        tile_size: args.tile_size,
        topology: args.topology,
        speed_multiplier: args.speed,
        base_delay_ms: DEFAULT_BASE_SIMULATION_DELAY_MS,
    };
    let config = if args.strict {
        config.validate(&display)?;
        config
    } else {
        config.with_fallbacks(&display)
    };

    log::info!(
        "Current game settings: field {}x{}, tile size {}, {} topology, speed multiplier {}",
        config.field_width,
        config.field_height,
        config.tile_size,
        config.topology,
        config.speed_multiplier
    );

    let mut session = Session::new(config.build_engine()?);
    seed(&mut session, &args.patterns)?;
    log::info!("Seeded {} live cells", session.engine().grid().alive_count());

    let delay = if args.no_delay {
        Duration::ZERO
    } else {
        config.step_delay()
    };

    session.start()?;
    while session.phase() == Phase::Running {
        if args.max_generations.is_some_and(|max| session.generation() >= max) {
            session.pause()?;
            break;
        }
        let result = session.tick()?;
        log::info!(
            "Generation {}: {} alive, {} dead or empty, changed = {}",
            session.generation(),
            result.alive_count(),
            result.dead_or_empty_count,
            result.changed
        );
        if !delay.is_zero() && session.phase() == Phase::Running {
            std::thread::sleep(delay);
        }
    }

    log::info!(
        "Stopped in phase {} after {} generations with {} live cells",
        session.phase(),
        session.generation(),
        session.engine().grid().alive_count()
    );
    Ok(())
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_placement() {
        let p: Placement = "glider@4, 7".parse().unwrap();
        assert_eq!(p.pattern, Pattern::Glider);
        assert_eq!((p.column, p.row), (4, 7));
    }

    #[test]
    fn test_parse_placement_errors() {
        assert!("glider".parse::<Placement>().unwrap_err().contains("NAME@COLUMN,ROW"));
        assert!("glider@4".parse::<Placement>().unwrap_err().contains("COLUMN,ROW"));
        assert!("glider@x,1".parse::<Placement>().unwrap_err().starts_with("bad column"));
        assert!("glider@1,-2".parse::<Placement>().unwrap_err().starts_with("bad row"));
        assert!("pulsar@1,1".parse::<Placement>().is_err());
    }
}
