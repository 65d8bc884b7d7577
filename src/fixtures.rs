//! Synthetic game documents for tests, benches and `sfo_generate`.
//!
//! Semua judul dan ID fiktif.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::EncodeConfig;
use crate::format::{keys, Document, Entry, VERSION};
use crate::storage;

/// Headroom reserved past each value's data length.
pub const MAX_LEN_HEADROOM: u32 = 16;

/// Isi `PS3_DISC.SFB` palsu; cukup supaya folder terlihat seperti disc dump.
pub const DISC_SFB_STUB: &[u8] = b"FAKE_PS3_DISC_DATA_FOR_TESTING_ONLY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleGame {
    pub title: &'static str,
    pub title_id: &'static str,
    pub category: &'static str,
    pub app_ver: &'static str,
}

const fn game(
    title: &'static str,
    title_id: &'static str,
    category: &'static str,
    app_ver: &'static str,
) -> SampleGame {
    SampleGame {
        title,
        title_id,
        category,
        app_ver,
    }
}

pub const SAMPLE_GAMES: [SampleGame; 15] = [
    game("Galactic Warriors: Return of the Void", "BLUS12345", "DG", "01.00"),
    game("Crystal Quest: Legends of Mystara", "BLES67890", "DG", "01.20"),
    game("Neon Racers: Future Streets", "BCUS11111", "DG", "02.01"),
    game("Adventure Island: Lost Treasures", "BCES22222", "DG", "01.10"),
    game("Space Marines: Infinite War", "BLUS33333", "DG", "03.00"),
    game("Magic Kingdom: Dragon's Crown", "BLES44444", "DG", "01.05"),
    game("Cyber Punk: Digital Revolution", "BCUS55555", "DG", "01.30"),
    game("Fantasy Quest: Ancient Realms", "BCES66666", "DG", "02.15"),
    game("Metal Storm: Apocalypse Rising", "BLUS77777", "DG", "01.00"),
    game("Ocean Adventure: Deep Waters", "BLES88888", "DG", "01.25"),
    game("Desert Combat: Sand Warriors", "BCUS99999", "DG", "01.40"),
    game("Forest Guardian: Nature's Call", "BCES10101", "DG", "01.00"),
    game("City Builder: Metropolis Dreams", "BLUS20202", "DG", "02.30"),
    game("Puzzle Master: Mind Bender", "BLES30303", "DG", "01.15"),
    game("Racing Thunder: Speed Demons", "BCUS40404", "DG", "01.50"),
];

impl SampleGame {
    /// Full 13-entry document, keys in sorted order as real producers write them.
    pub fn to_document(&self) -> Document {
        let entries = [
            Entry::text(keys::APP_VER, self.app_ver),
            Entry::integer(keys::ATTRIBUTE, 0),
            Entry::integer(keys::BOOTABLE, 1),
            Entry::text(keys::CATEGORY, self.category),
            Entry::text(
                keys::LICENSE,
                "This is a fake test game for development purposes only.",
            ),
            Entry::text(keys::NP_COMMUNICATION_ID, self.np_communication_id()),
            Entry::integer(keys::PARENTAL_LEVEL, 1),
            Entry::text(keys::PS3_SYSTEM_VER, "03.5500"),
            Entry::integer(keys::RESOLUTION, 63),
            Entry::integer(keys::SOUND_FORMAT, 279),
            Entry::text(keys::TITLE, self.title),
            Entry::text(keys::TITLE_ID, self.title_id),
            Entry::text(keys::VERSION, self.app_ver),
        ];

        entries
            .into_iter()
            .map(|entry| {
                let max_len = entry.data_len + MAX_LEN_HEADROOM;
                entry.with_max_len(max_len)
            })
            .fold(Document::new(VERSION), Document::with_entry)
    }

    /// `NPWRnnnnn_00`, derived from the title id so output is reproducible.
    pub fn np_communication_id(&self) -> String {
        let mut hash = self
            .title_id
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        for _ in 0..10 {
            hash = hash.wrapping_mul(6364136223846793005).wrapping_add(1);
        }
        format!("NPWR{:05}_00", hash % 99_999)
    }

    /// Directory name with path-hostile characters replaced, e.g.
    /// `Magic Kingdom_ Dragon's Crown [BLES44444]`.
    pub fn dir_name(&self) -> String {
        let safe: String = self
            .title
            .chars()
            .map(|c| match c {
                '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
                c => c,
            })
            .collect();
        format!("{} [{}]", safe, self.title_id)
    }

    /// Write `<output>/<dir_name>/PS3_GAME/PARAM.SFO` plus the
    /// `PS3_DISC.SFB` stub next to `PS3_GAME/`. Returns the game directory.
    pub fn write_to(&self, output: &Path, config: EncodeConfig) -> crate::Result<PathBuf> {
        let game_dir = output.join(self.dir_name());
        let ps3_game = game_dir.join("PS3_GAME");
        fs::create_dir_all(&ps3_game)?;

        let sfo = ps3_game.join("PARAM.SFO");
        storage::write_file_with(&sfo, &self.to_document(), config)?;
        fs::write(game_dir.join("PS3_DISC.SFB"), DISC_SFB_STUB)?;

        debug!(path = %sfo.display(), title_id = self.title_id, "game folder written");
        Ok(game_dir)
    }
}
