//! Terminal pathfinding demo.
//!
//! Run: cargo run --bin pathfind -- [WIDTH HEIGHT SEED DENSITY MAX_NODES]

use gridstar_demos::{DemoConfig, Scene};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match DemoConfig::from_args(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("usage: pathfind [WIDTH HEIGHT SEED DENSITY MAX_NODES]");
            std::process::exit(2);
        }
    };

    let mut scene = Scene::new(&config);
    println!("{}", scene.render());

    if let Err(e) = scene.plan() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    println!("{}", scene.render());

    let walked = scene.walk();
    log::info!("agent walked {walked} cells and stands at {}", scene.agent().position());
}
