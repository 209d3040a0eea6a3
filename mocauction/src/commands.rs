use crate::IOArgs;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Clear the auction and report the equilibrium settlement
    Solve {
        #[command(flatten)]
        io: IOArgs,
    },
    /// Settle welfare at an alternative market price and compare it
    /// against the equilibrium
    Evaluate {
        #[command(flatten)]
        io: IOArgs,

        /// The alternative market price to settle at
        #[arg(short, long)]
        price: f64,
    },
}
