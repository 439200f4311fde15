use std::fmt;

/// How a downloaded asset is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
    /// Not an archive: the download is the executable itself.
    Raw,
}

impl ArchiveFormat {
    /// Detect the format from a download or asset file name.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.ends_with(".zip") {
            ArchiveFormat::Zip
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            ArchiveFormat::TarGz
        } else {
            ArchiveFormat::Raw
        }
    }

    pub fn is_archive(&self) -> bool { !matches!(self, ArchiveFormat::Raw) }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::Raw => "raw",
        })
    }
}
