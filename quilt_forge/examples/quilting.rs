//! Synthesizes a quilted texture out of an exemplar image.
//!
//! ```sh
//! cargo run --example quilting -- <exemplar> <output> [patches_per_side] [patch_size] [seed]
//! ```

use quilt_forge::quilt::Quilt;
use quilt_forge::vis;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

const USAGE: &str = "usage: quilting <exemplar> <output> [patches_per_side] [patch_size] [seed]";

fn main() {
    let mut args = std::env::args().skip(1);
    let exemplar_path = args.next().expect(USAGE);
    let output_path = args.next().expect(USAGE);
    let patches_per_side = parse_or(args.next(), 8);
    let patch_size = parse_or(args.next(), 30);
    let seed = parse_or(args.next(), 42u64);

    let source = vis::load_plane(&exemplar_path).unwrap();
    let mut quilt = Quilt::new(&source, patches_per_side as u32, patch_size as u32).unwrap();
    let mut rng = ChaChaRng::seed_from_u64(seed);

    quilt.generate(&mut rng).unwrap();
    quilt.stitch().unwrap();

    vis::save_plane(quilt.output(), &output_path).unwrap();

    println!(
        "quilted {}x{} patches of size {} into {} ({}x{} px)",
        patches_per_side,
        patches_per_side,
        patch_size,
        output_path,
        quilt.dimension(),
        quilt.dimension(),
    );
}

fn parse_or<T: std::str::FromStr>(arg: Option<String>, default: T) -> T {
    arg.map(|value| value.parse().ok().expect(USAGE))
        .unwrap_or(default)
}
