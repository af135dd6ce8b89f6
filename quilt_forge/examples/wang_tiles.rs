//! Builds the eight-tile Wang set out of a corner-coded exemplar and tiles a
//! plane with it.
//!
//! The exemplar is a square image whose four quadrants carry the corner codes
//! red, yellow, blue, green in row-major order.
//!
//! ```sh
//! cargo run --example wang_tiles -- <exemplar> <output_dir> [map_side] [seed]
//! ```

use quilt_forge::vis;
use quilt_forge::wang::{self, TileMap, WangTile};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

const USAGE: &str = "usage: wang_tiles <exemplar> <output_dir> [map_side] [seed]";

fn main() {
    let mut args = std::env::args().skip(1);
    let exemplar_path = args.next().expect(USAGE);
    let output_dir = args.next().expect(USAGE);
    let map_side: u32 = parse_or(args.next(), 5);
    let seed: u64 = parse_or(args.next(), 42);

    let source = vis::load_plane(&exemplar_path).unwrap();

    let tiles = wang::build_tile_set(&source).unwrap();
    let mut tile_paths = Vec::with_capacity(tiles.len());
    for (index, tile) in tiles.iter().enumerate() {
        let path = format!("{}/tile{}_{}.png", output_dir, index + 1, tile);
        vis::save_plane(tile.image(), &path).unwrap();
        tile_paths.push(path);
    }

    // Tile from the files on disk, recovering the edge codes from the file
    // names; a later tiling run can skip synthesis and start here.
    let tiles: Vec<WangTile> = tile_paths
        .iter()
        .map(|path| WangTile::load(path).unwrap())
        .collect();

    let mut map = TileMap::new(tiles, map_side, map_side).unwrap();
    let mut rng = ChaChaRng::seed_from_u64(seed);
    map.generate(&mut rng).unwrap();

    println!("{map}");

    let path = format!("{output_dir}/tiled.png");
    vis::save_plane(&map.to_plane().unwrap(), &path).unwrap();

    println!(
        "tiled a {map_side}x{map_side} map into {path} ({}x{} px)",
        map.pixel_width(),
        map.pixel_height(),
    );
}

fn parse_or<T: std::str::FromStr>(arg: Option<String>, default: T) -> T {
    arg.map(|value| value.parse().ok().expect(USAGE))
        .unwrap_or(default)
}
