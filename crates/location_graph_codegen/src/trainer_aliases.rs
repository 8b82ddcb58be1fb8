//! Trainer grouping alias map generation.

use crate::models::{is_canonical_form, TrainerAliasFile};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::{fs, writeln};

/// Generate TRAINER_ALIASES phf map (trainer grouping key -> location key)
pub fn generate(out_dir: &Path, data_dir: &Path) {
    let json =
        fs::read_to_string(data_dir.join("trainer_aliases.json")).expect("trainer_aliases.json");
    let file: TrainerAliasFile = serde_json::from_str(&json).expect("parse trainer_aliases");

    let mut phf_map = phf_codegen::Map::new();
    for (group, location) in &file.aliases {
        assert!(
            is_canonical_form(location),
            "trainer_aliases.json: target `{}` is not a canonical key",
            location
        );
        phf_map.entry(group.as_str(), &format!("{:?}", location));
    }
    let phf_str = phf_map.build().to_string();

    let dest = out_dir.join("trainer_aliases.rs");
    let mut file = BufWriter::new(File::create(&dest).expect("create trainer_aliases.rs"));
    writeln!(file, "/// Trainer grouping keys that do not name their location directly").unwrap();
    writeln!(
        file,
        "pub static TRAINER_ALIASES: phf::Map<&'static str, &'static str> = {};",
        phf_str
    )
    .unwrap();
}
