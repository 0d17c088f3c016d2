use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

use elemental_spawning::{
    BiasConfig, BiasParams, BiomeProfile, Creature, CreatureId, ElementManager, REAL_ELEMENTS,
};

#[derive(Parser, Debug)]
#[command(name = "elemental_spawning")]
#[command(about = "Simulate elemental affinity assignment for creature spawns")]
struct Args {
    /// Bias configuration file (uses the embedded defaults if not specified)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bias tuning parameters as JSON (uses built-in defaults if not specified)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Creatures to spawn per biome
    #[arg(short = 'n', long, default_value = "200")]
    spawns: u32,

    /// Run the scan under an active thunderstorm
    #[arg(long)]
    storm: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    // Initialize RNG
    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let config = match &args.config {
        Some(path) => BiasConfig::load_from(path),
        None => BiasConfig::defaults(),
    };
    let params = match &args.params {
        Some(path) => BiasParams::load_from(path),
        None => BiasParams::default(),
    };

    let manager = ElementManager::new(config, params);
    let biomes = demo_biomes();

    // Spawn a batch per biome, then run one scan pass over everything
    let mut creatures: Vec<Creature> = Vec::new();
    let mut next_id = 0u32;
    for (biome, species) in &biomes {
        for _ in 0..args.spawns {
            creatures.push(Creature::new(CreatureId(next_id), species, biome.clone()));
            next_id += 1;
        }
    }

    let assigned = manager.scan(&mut creatures, args.storm, &mut rng);

    println!("seed: {}", seed);
    println!("thunderstorm: {}", args.storm);
    println!("assigned {} of {} creatures", assigned, creatures.len());
    println!();

    print!("{:<20} {:<10}", "biome", "species");
    for element in &REAL_ELEMENTS {
        print!(" {:>8}", element.name());
    }
    println!();

    for (biome, species) in &biomes {
        print!("{:<20} {:<10}", biome.key, species);
        for &element in &REAL_ELEMENTS {
            let count = creatures
                .iter()
                .filter(|c| c.biome.key == biome.key && c.element == element)
                .count();
            print!(" {:>8}", count);
        }
        println!();
    }
}

/// Fixed roster of demo biomes and the species spawning in each
fn demo_biomes() -> Vec<(BiomeProfile, &'static str)> {
    vec![
        (BiomeProfile::new("desert", 38.0, false, false), "scorpion"),
        (BiomeProfile::new("tundra", -12.0, true, false), "ice wolf"),
        (
            BiomeProfile::new("temperate_forest", 16.0, false, true),
            "wolf",
        ),
        (BiomeProfile::new("plains", 18.0, false, false), "boar"),
        (
            BiomeProfile::new("volcanic_wasteland", 45.0, false, false),
            "phoenix",
        ),
        (
            BiomeProfile::new("mushroom_forest", 14.0, false, true),
            "giant spider",
        ),
    ]
}
