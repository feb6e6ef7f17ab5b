// ai
//! 🗺️ Registry — the atlas and the measuring tape of gcsrb.
//!
//! 🎬 COLD OPEN — INT. GEOGRAPHY CLASS — 8:02 AM
//!
//! "Name a city in `asia-northeast2`." Silence. A cough. Somebody says "Tokyo?"
//! Wrong. It's Osaka. It has always been Osaka. This module knows. This module
//! will always know, because the answer is baked into a `static` and no one,
//! not even a sleep-deprived contributor, gets to mutate it at runtime.
//!
//! 🧠 Knowledge graph:
//! - `REGIONS`: the closed set of single-region bucket locations, in the order
//!   batch benchmarks walk them. One id, one display name. No duplicates.
//! - `FILE_SIZE_CLASSES`: the three payloads we time (`2mib.txt`, `64mib.txt`,
//!   `256mib.txt`), their byte and MiB counts, and the MD5 of their all-zero body.
//! - Lookups return `Option`. Absence is not an error here; the runner decides
//!   what absence means. We're a phone book, not a bouncer.
//!
//! 🦆 The duck has been to all 34 regions. It did not enjoy the layovers.

/// 📏 One mebibyte. Not a megabyte. We will not be taking questions.
pub const MIB: u64 = 1024 * 1024;

/// 🌍 A single-region storage location: the code the provider uses and the name humans use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// 🏷️ Provider region code, e.g. `us-west1`.
    pub id: &'static str,
    /// 🏙️ Human-readable location, e.g. `Oregon`.
    pub display_name: &'static str,
}

/// 📦 A logical payload size we know how to benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSizeClass {
    /// 🏷️ Object name in every bucket, e.g. `2mib.txt`.
    pub id: &'static str,
    /// 📏 Exact payload length in bytes.
    pub bytes: u64,
    /// 📏 Same length in MiB. `bytes == mib * MIB`, always.
    pub mib: u64,
    /// 🔒 Base64 MD5 of `bytes` zero bytes, sent as `Content-Md5` on uploads.
    pub content_md5: &'static str,
}

macro_rules! region {
    ($id:literal, $name:literal) => {
        Region { id: $id, display_name: $name }
    };
}

/// 🗺️ Every supported single-region location, in batch iteration order.
pub static REGIONS: [Region; 34] = [
    region!("northamerica-northeast1", "Montréal"),
    region!("northamerica-northeast2", "Toronto"),
    region!("us-central1", "Iowa"),
    region!("us-east1", "South Carolina"),
    region!("us-east4", "Northern Virginia"),
    region!("us-east5", "Columbus"),
    region!("us-south1", "Dallas"),
    region!("us-west1", "Oregon"),
    region!("us-west2", "Los Angeles"),
    region!("us-west3", "Salt Lake City"),
    region!("us-west4", "Las Vegas"),
    region!("southamerica-east1", "São Paulo"),
    region!("southamerica-west1", "Santiago"),
    region!("europe-central2", "Warsaw"),
    region!("europe-north1", "Finland"),
    region!("europe-southwest1", "Madrid"),
    region!("europe-west1", "Belgium"),
    region!("europe-west2", "London"),
    region!("europe-west3", "Frankfurt"),
    region!("europe-west4", "Netherlands"),
    region!("europe-west6", "Zürich"),
    region!("europe-west8", "Milan"),
    region!("europe-west9", "Paris"),
    region!("asia-east1", "Taiwan"),
    region!("asia-east2", "Hong Kong"),
    region!("asia-northeast1", "Tokyo"),
    region!("asia-northeast2", "Osaka"),
    region!("asia-northeast3", "Seoul"),
    region!("asia-south1", "Mumbai"),
    region!("asia-south2", "Delhi"),
    region!("asia-southeast1", "Singapore"),
    region!("asia-southeast2", "Jakarta"),
    region!("australia-southeast1", "Sydney"),
    region!("australia-southeast2", "Melbourne"),
];

/// 📦 The three payload sizes, smallest first.
pub static FILE_SIZE_CLASSES: [FileSizeClass; 3] = [
    FileSizeClass {
        id: "2mib.txt",
        bytes: 2 * MIB,
        mib: 2,
        content_md5: "stEjbChqPAcEIk/kEF7KSQ==",
    },
    FileSizeClass {
        id: "64mib.txt",
        bytes: 64 * MIB,
        mib: 64,
        content_md5: "f2FNqTKc066/WbkarcML8A==",
    },
    FileSizeClass {
        id: "256mib.txt",
        bytes: 256 * MIB,
        mib: 256,
        content_md5: "H1A55QvWaykMVmhNhVDGwg==",
    },
];

/// 🔍 Find a region by its provider code.
pub fn region(id: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.id == id)
}

/// 🏙️ Display name for a region code, or `None` if we've never heard of it.
pub fn region_display_name(id: &str) -> Option<&'static str> {
    region(id).map(|r| r.display_name)
}

/// 🔍 Find a file-size class by object name.
pub fn file_size_class(id: &str) -> Option<&'static FileSizeClass> {
    FILE_SIZE_CLASSES.iter().find(|c| c.id == id)
}

/// 🧱 The upload body for a size class: exactly `bytes` zero bytes.
/// 256 MiB of nothing. The most expensive nothing you'll ever send.
pub fn upload_payload(class: &FileSizeClass) -> Vec<u8> {
    vec![0u8; class.bytes as usize]
}
