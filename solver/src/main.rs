use std::num::NonZero;
use std::process::ExitCode;

use decant::{ConfigurationBuilder, Palette};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut builder = ConfigurationBuilder::with_dims(NonZero::new(6).unwrap(), NonZero::new(4).unwrap());
    builder
        .add_vial([Palette::Red, Palette::Yellow, Palette::Pink, Palette::LightBlue])
        .add_vial([Palette::Pink, Palette::Yellow, Palette::Red, Palette::LightBlue])
        .add_vial([Palette::LightBlue, Palette::Red, Palette::Yellow, Palette::Pink])
        .add_vial([Palette::Yellow, Palette::LightBlue, Palette::Pink, Palette::Red]);

    let start = match builder.build() {
        Ok(start) => start,
        Err(reasons) => {
            for reason in reasons {
                error!("{}", reason);
            }
            return ExitCode::FAILURE;
        }
    };

    print!("{}", start);

    match start.solve() {
        Ok(solution) => {
            for pour in solution.moves {
                let (source, destination) = pour.one_based();
                println!("Pour vial {} into vial {}.", source, destination);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
