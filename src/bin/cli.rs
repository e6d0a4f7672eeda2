use clap::{App, Arg, ArgMatches, SubCommand};
use gw2link::{
    config::{DEFAULT_POLL_INTERVAL_MS, EXPECTED_UI_VERSION},
    error::LinkError,
    layout, Avatar, LinkReader, RawFields, RegionConfig, Result,
};
use std::{thread, time::Duration};

fn main() {
    env_logger::init();

    let region_args = [
        Arg::with_name("name")
            .short("n")
            .long("name")
            .value_name("NAME")
            .help("Shared memory name (defaults to the platform's MumbleLink name)")
            .takes_value(true)
            .global(true),
        Arg::with_name("file")
            .short("f")
            .long("file")
            .value_name("FILE")
            .help("Read a file-backed region instead of named shared memory")
            .takes_value(true)
            .conflicts_with("name")
            .global(true),
    ];

    let matches = App::new("gw2link")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Guild Wars 2 positional link reader")
        .args(&region_args)
        .subcommand(
            SubCommand::with_name("read")
                .about("Read one snapshot")
                .arg(Arg::with_name("json").long("json").help("Print as JSON"))
                .arg(
                    Arg::with_name("raw")
                        .long("raw")
                        .help("Print the structural decode even without a producer"),
                ),
        )
        .subcommand(
            SubCommand::with_name("watch")
                .about("Poll the region and report session changes")
                .arg(
                    Arg::with_name("interval")
                        .short("i")
                        .long("interval")
                        .value_name("MS")
                        .help("Poll interval in milliseconds")
                        .default_value("20")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("count")
                        .short("c")
                        .long("count")
                        .value_name("COUNT")
                        .help("Stop after this many reads")
                        .takes_value(true),
                )
                .arg(Arg::with_name("json").long("json").help("Print each snapshot as JSON")),
        )
        .subcommand(SubCommand::with_name("info").about("Show protocol constants and layout"))
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        ("read", Some(read_matches)) => handle_read(&region_config(read_matches), read_matches),
        ("watch", Some(watch_matches)) => handle_watch(&region_config(watch_matches), watch_matches),
        ("info", Some(_)) => show_info(),
        _ => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn region_config(matches: &ArgMatches) -> RegionConfig {
    match (matches.value_of("file"), matches.value_of("name")) {
        (Some(path), _) => RegionConfig::file(path),
        (None, Some(name)) => RegionConfig::new(name),
        (None, None) => RegionConfig::default(),
    }
}

fn handle_read(config: &RegionConfig, matches: &ArgMatches) -> Result<()> {
    let reader = LinkReader::open(config)?;
    let json = matches.is_present("json");

    if matches.is_present("raw") {
        let image = reader.read_image()?;
        let raw = RawFields::decode(&image);
        if json {
            println!("{}", to_json(&raw)?);
        } else {
            println!("{:#?}", raw);
        }
        return Ok(());
    }

    match reader.read()? {
        Some(avatar) if json => println!("{}", to_json(&avatar)?),
        Some(avatar) => print_avatar(&avatar),
        None => println!("No producer is publishing to '{}'", config.name),
    }
    Ok(())
}

fn handle_watch(config: &RegionConfig, matches: &ArgMatches) -> Result<()> {
    let interval: u64 = matches
        .value_of("interval")
        .map(str::parse)
        .transpose()
        .map_err(|_| LinkError::invalid_parameter("interval", "Invalid interval"))?
        .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
    let count: Option<u64> = matches
        .value_of("count")
        .map(str::parse)
        .transpose()
        .map_err(|_| LinkError::invalid_parameter("count", "Invalid count"))?;
    let json = matches.is_present("json");

    let reader = LinkReader::open(config)?;
    let mut last: Option<Avatar> = None;
    let mut reads = 0u64;

    while count.map_or(true, |count| reads < count) {
        let current = reader.read()?;
        reads += 1;

        match (&last, &current) {
            (None, Some(avatar)) => log::info!(
                "producer online, session {:08x}",
                avatar.context().fingerprint()
            ),
            (Some(_), None) => log::info!("producer offline"),
            (Some(previous), Some(avatar)) if !previous.is_same_session(avatar) => log::info!(
                "session changed {:08x} -> {:08x}",
                previous.context().fingerprint(),
                avatar.context().fingerprint()
            ),
            _ => {}
        }

        if let Some(avatar) = &current {
            let advanced = last.as_ref().map_or(true, |prev| prev.tick() != avatar.tick());
            if advanced {
                if json {
                    println!("{}", to_json(avatar)?);
                } else {
                    print_avatar_line(avatar);
                }
            }
        }

        last = current;
        thread::sleep(Duration::from_millis(interval));
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| LinkError::invalid_parameter("json", format!("Failed to serialize: {}", e)))
}

fn print_avatar(avatar: &Avatar) {
    let identity = avatar.identity();
    let context = avatar.context();

    println!("Snapshot (tick {}, version {})", avatar.tick(), avatar.version());
    println!("  Character: {} ({:?} {:?})", identity.name(), identity.race(), identity.profession());
    println!("  Commander: {}", identity.is_commander());
    println!("  World: {}  Team color: {}", identity.world_id(), identity.team_color_id());
    println!("  Avatar position: {:?}", avatar.avatar_position().to_array());
    println!("  Avatar front:    {:?}", avatar.avatar_front().to_array());
    println!("  Camera position: {:?}", avatar.camera_position().to_array());
    println!("  Camera front:    {:?}", avatar.camera_front().to_array());
    println!("  FOV: {:.3}", identity.fov());
    println!("  Map: {} ({:?})  Shard: {}  Instance: {}", context.map_id(), context.map_type(), context.shard_id(), context.instance());
    match context.server_address().socket_addr() {
        Some(addr) => println!("  Server: {}", addr),
        None => println!("  Server: {:?}", context.server_address()),
    }
    println!("  Build: {}", context.build_id());
    println!("  Session: {:08x}", context.fingerprint());

    if let Some(ext) = context.extension() {
        println!("  UI state: {:#x}  In combat: {}", ext.ui_state.0, ext.ui_state.is_in_combat());
        println!("  Mount: {:?}", ext.mount());
        println!("  Player map position: {:?}", ext.player_position);
    }
}

fn print_avatar_line(avatar: &Avatar) {
    let p = avatar.avatar_position();
    println!(
        "tick={} map={} pos=({:.2}, {:.2}, {:.2}) session={:08x}",
        avatar.tick(),
        avatar.context().map_id(),
        p.x,
        p.y,
        p.z,
        avatar.context().fingerprint()
    );
}

fn show_info() -> Result<()> {
    println!("gw2link positional link reader");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Default region: {}", RegionConfig::default_name());
    println!("Producer marker: {:?}", layout::PRODUCER_MARKER);
    println!("Expected ui_version: {}", EXPECTED_UI_VERSION);
    println!("Region size: {} bytes", layout::LINK_SIZE);

    println!("\nLayout:");
    let fields = [
        ("ui_version", layout::VERSION_OFFSET),
        ("ui_tick", layout::TICK_OFFSET),
        ("avatar_position", layout::AVATAR_POSITION_OFFSET),
        ("avatar_front", layout::AVATAR_FRONT_OFFSET),
        ("avatar_top", layout::AVATAR_TOP_OFFSET),
        ("name", layout::NAME_OFFSET),
        ("camera_position", layout::CAMERA_POSITION_OFFSET),
        ("camera_front", layout::CAMERA_FRONT_OFFSET),
        ("camera_top", layout::CAMERA_TOP_OFFSET),
        ("identity", layout::IDENTITY_OFFSET),
        ("context_len", layout::CONTEXT_LEN_OFFSET),
        ("context", layout::CONTEXT_OFFSET),
        ("description", layout::DESCRIPTION_OFFSET),
    ];
    for (name, offset) in fields.iter() {
        println!("  {:>5}  {}", offset, name);
    }

    Ok(())
}
