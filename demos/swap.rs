use clap::Parser;

use bdd_algebra::bdd::{Bdd, BddConfig};
use bdd_algebra::vars::{VarMap, VarSet};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of variables in the chain.
    #[arg(value_name = "INT", default_value = "4")]
    n: u32,

    /// BDD size (in bits, so the actual size is `2^size` nodes).
    #[clap(long, value_name = "INT", default_value = "20")]
    size: usize,

    /// Enable debug logging.
    #[clap(long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);
    if args.n < 2 {
        color_eyre::eyre::bail!("need at least 2 variables, got {}", args.n);
    }

    let bdd = Bdd::with_config(&BddConfig {
        storage_bits: args.size,
        ..BddConfig::default()
    });
    println!("bdd = {:?}", bdd);

    // f = (x0 ∧ x1) ∨ (x2 ∧ x3) ∨ ... pairs adjacent variables
    let n = args.n;
    let mut f = bdd.zero;
    for i in (0..n - 1).step_by(2) {
        let pair = bdd.apply_and(bdd.mk_var(i), bdd.mk_var(i + 1));
        f = bdd.apply_or(f, pair);
    }
    println!("f of size {} = {}", bdd.size(f), bdd.render(f));

    // Reverse the variable order.
    let reverse: VarMap = (0..n).map(|v| (v, n - 1 - v)).collect();
    let g = bdd.replace(f, &reverse);
    println!("f reversed, size {} = {}", bdd.size(g), bdd.render(g));
    if let Err(e) = bdd.check_invariants(g) {
        color_eyre::eyre::bail!("broken diagram: {}", e);
    }

    // Quantify out the even variables.
    let evens: VarSet = (0..n).step_by(2).collect();
    let h = bdd.exists(f, &evens);
    println!("exists evens. f = {}", bdd.render(h));

    match bdd.one_sat(f) {
        Some(assignment) => println!("one solution: {:?}", assignment),
        None => println!("unsatisfiable"),
    }
    println!("solutions: {}", bdd.sat_count(f, n as usize));
    println!(
        "cache: hits = {}, misses = {}",
        bdd.cache().hits(),
        bdd.cache().misses()
    );

    Ok(())
}
