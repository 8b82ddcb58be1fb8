use clap::Args;
use location_graph::normalize::{display_name_guess, normalize};

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Raw identifiers, e.g. `SproutTower1F` or "Route 29"
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Also print the display name guess
    #[arg(short, long)]
    pub display: bool,
}

pub fn execute(args: NormalizeArgs) {
    let width = args.keys.iter().map(|k| k.len()).max().unwrap_or(0);
    for key in &args.keys {
        if args.display {
            println!("{:<width$} -> {} ({})", key, normalize(key), display_name_guess(key));
        } else {
            println!("{:<width$} -> {}", key, normalize(key));
        }
    }
}
