use clap::Parser;
use dicebag::{RollContext, DEFAULT_MAX_ROLLS};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dicebag")]
#[command(about = "Roll dice expressions such as 4K5d6+1 or 2d6 + 1d4")]
struct Args {
    /// Expression to roll; starts an interactive prompt when omitted
    expression: Option<String>,

    /// Print every die of the pool instead of the total
    #[arg(short, long)]
    pool: bool,

    /// Seed the random generator for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of dice a single roll may draw
    #[arg(long, default_value_t = DEFAULT_MAX_ROLLS, conflicts_with = "unbounded")]
    max_rolls: usize,

    /// Never stop a roll for drawing too many dice
    #[arg(long)]
    unbounded: bool,

    /// Print the parsed expression tree before the result
    #[arg(long)]
    ast: bool,
}

impl Args {
    fn context(&self) -> RollContext<StdRng> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let max_rolls = (!self.unbounded).then_some(self.max_rolls);
        RollContext::new(max_rolls, rng)
    }

    fn evaluate(&self, ctx: &mut RollContext<StdRng>, line: &str) -> dicebag::Result<String> {
        let node = dicebag::parse_ast(line)?;
        let die = dicebag::compile(&node);
        let result = if self.pool {
            format!("{:?}", ctx.pool(&die)?)
        } else {
            ctx.roll(&die)?.to_string()
        };
        if self.ast {
            Ok(format!("{}\n{}", node, result))
        } else {
            Ok(result)
        }
    }

    fn repl(&self, ctx: &mut RollContext<StdRng>) -> io::Result<()> {
        println!("Type 'quit' or 'exit' to exit");
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            match line {
                "" => continue,
                "exit" | "quit" => break,
                _ => match self.evaluate(ctx, line) {
                    Ok(out) => println!("{}", out),
                    Err(why) => eprintln!("Error: {}", why),
                },
            }
            io::stdout().flush()?;
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut ctx = args.context();

    match &args.expression {
        Some(expression) => match args.evaluate(&mut ctx, expression) {
            Ok(out) => {
                println!("{}", out);
                ExitCode::SUCCESS
            }
            Err(why) => {
                eprintln!("Error: {}", why);
                ExitCode::FAILURE
            }
        },
        None => match args.repl(&mut ctx) {
            Ok(()) => ExitCode::SUCCESS,
            Err(why) => {
                eprintln!("Error: {}", why);
                ExitCode::FAILURE
            }
        },
    }
}
