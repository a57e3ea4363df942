use std::error::Error;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    journeys::example_apps::run_shuffle_demo(
        std::env::args().skip(1),
        io::stdin().lock(),
        io::stdout().lock(),
    )
}
