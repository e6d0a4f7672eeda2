//! Basic usage example of the gw2link reader

use gw2link::{LinkReader, Result};
use std::{thread, time::Duration};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    println!("gw2link Positional Link Example");
    println!("===============================");

    let mut reader = LinkReader::open_default()?;
    println!("Mapped region: {}", reader.region()?.name());

    for _ in 0..10 {
        match reader.read()? {
            Some(avatar) => {
                let identity = avatar.identity();
                let position = avatar.avatar_position();
                println!(
                    "{} on map {} at ({:.1}, {:.1}, {:.1})",
                    identity.name(),
                    identity.map_id(),
                    position.x,
                    position.y,
                    position.z
                );
            }
            None => println!("Guild Wars 2 is not publishing yet"),
        }
        thread::sleep(Duration::from_millis(500));
    }

    reader.close();
    println!("Reader closed");

    Ok(())
}
