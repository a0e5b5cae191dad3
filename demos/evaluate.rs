use clap::Parser;

use mdpf_rs::mdpf::{EvalConfig, Mdpf, UntilPolicy};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Formula in prefix notation, e.g. `@$send` or `|$send$try`.
    #[arg(value_name = "FORMULA", default_value = "@$send")]
    formula: String,

    /// Comparator for a probability query: any combination of `<`, `>`, `=`.
    #[arg(long, value_name = "CMP", requires = "threshold")]
    cmp: Option<String>,

    /// Probability threshold for the query, in [0, 1].
    #[arg(long, value_name = "FLOAT")]
    threshold: Option<f64>,

    /// Evaluate bounded until to its left operand instead of failing.
    #[arg(long)]
    legacy_until: bool,

    /// Print the model before evaluating.
    #[arg(long)]
    print_model: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let until = if args.legacy_until {
        UntilPolicy::Legacy
    } else {
        UntilPolicy::Reject
    };

    // A sender that retries until the channel (A) or the backup (B) accepts.
    let model = Mdpf::builder()
        .propositions(["A", "B", "M", "U"])
        .states(["s0", "s1", "s2", "s3", "s4"])
        .transition("s0", "s3", "wait", 1.0, "$M")
        .transition("s1", "s1", "try", 1.0, "$A")
        .transition("s1", "s2", "try", 0.8, "$B")
        .transition("s1", "s3", "try", 0.2, "$B")
        .transition("s2", "s1", "send", 1.0, "")
        .transition("s3", "s1", "wait", 1.0, "$U")
        .transition("s4", "s0", "wait", 1.0, "&~$B$U")
        .eval_config(EvalConfig::default().with_until(until))
        .build()?;

    if args.print_model {
        println!("{}", model);
    }

    let res = model.evaluate(&args.formula)?;
    println!("Sat({}) =", args.formula);
    print!("{}", res.display(model.engine()));

    if let (Some(cmp), Some(threshold)) = (&args.cmp, args.threshold) {
        let found = res.get_probability(cmp, threshold)?;
        println!("P {} {}: {} matches", cmp, threshold, found.len());
        for (state, t) in found {
            println!("  ({}, {})", state, t.display(model.engine()));
        }
    }

    println!("bdd = {:?}", model.engine().bdd());

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
