use clap::Parser;
use moc_solver::io::Auction;

mod io;
pub use io::*;

mod commands;
pub use commands::*;

// The top-level arguments -- presently just which subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Solve { io } => {
                let input = io.read()?;
                let auction = serde_json::from_reader::<_, Auction>(input)?;
                let outcome = auction.solve()?;
                let output = io.write()?;
                serde_json::to_writer_pretty(output, &outcome)?;
            }
            Commands::Evaluate { io, price } => {
                let input = io.read()?;
                let auction = serde_json::from_reader::<_, Auction>(input)?;
                let evaluation = auction.evaluate(price)?;
                let output = io.write()?;
                serde_json::to_writer_pretty(output, &evaluation)?;
            }
        }

        Ok(())
    }
}
