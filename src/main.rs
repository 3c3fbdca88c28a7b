use clap::Parser;
use food_wheel::{simulate, FoodWheel, FoodWheelConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Spin a wheel to decide what to eat", long_about = None)]
struct Args {
    /// Seed for reproducible spins (defaults to OS entropy)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Window pixels per screen pixel
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=16))]
    scale: u32,

    /// Go straight to the wheel
    #[arg(long)]
    skip_intro: bool,

    /// Run one spin without a window and print the result
    #[arg(long)]
    headless: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.headless {
        let seed = args.seed.unwrap_or_else(rand::random);
        let report = simulate(seed, 0, 60_000);
        for (at, phase) in &report.transitions {
            println!("{at:>6} ms  {phase}");
        }
        match report.selection {
            Some(selection) => println!("seed {seed}: {}", selection.label),
            None => anyhow::bail!("seed {seed}: wheel did not settle"),
        }
        return Ok(());
    }

    let config = FoodWheelConfig::builder()
        .window_scale(args.scale)
        .show_intro(!args.skip_intro)
        .maybe_seed(args.seed)
        .build();
    FoodWheel::new(config).show()?;
    Ok(())
}
