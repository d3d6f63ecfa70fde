//! TrueType font to C header converter.
//!
//! This library reads a `.ttf` file and produces a C header that embeds the
//! font's bytes as a `const unsigned char` array, along with a size constant,
//! so that the font can be compiled into a program and loaded from memory.
//!
//! All symbol names in the header are derived from the input file name; see
//! [`Identifier`].

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

pub mod sfnt;

/// Required file name suffix, compared case-insensitively.
const FONT_SUFFIX: &str = ".ttf";

/// Everything that can stop a conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input file '{}' does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("input file '{}' must be a .ttf file", .0.display())]
    InvalidFormat(PathBuf),
    #[error("error accessing '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Process exit status for this error, distinct per validation failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::NotFound(_) => 2,
            Error::InvalidFormat(_) => 3,
            Error::Io { .. } => 1,
        }
    }

    fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_owned(),
            source,
        }
    }
}

/// Normalized name derived from the input file, shared by every symbol in
/// the generated header.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Derives the identifier from a path: directory and extension are
    /// dropped, the rest is lowercased and `-` becomes `_`.
    ///
    /// Returns `None` if the path has no file name or the name is not UTF-8.
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        Some(Identifier(stem.to_lowercase().replace('-', "_")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Include guard token, e.g. `MY_FONT_H`.
    pub fn guard(&self) -> String {
        format!("{}_H", self.0.to_uppercase())
    }

    pub fn array_symbol(&self) -> String {
        format!("{}_data", self.0)
    }

    pub fn size_symbol(&self) -> String {
        format!("{}_data_size", self.0)
    }

    pub fn header_file_name(&self) -> String {
        format!("{}.h", self.0)
    }
}

/// Checks that `path` names an existing file with a `.ttf` suffix.
///
/// Existence is checked before the suffix, and nothing is read either way.
pub fn validate_input(path: &Path) -> Result<(), Error> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_owned()));
    }
    let has_suffix = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_lowercase().ends_with(FONT_SUFFIX))
        .unwrap_or(false);
    if !has_suffix {
        return Err(Error::InvalidFormat(path.to_owned()));
    }
    Ok(())
}

/// Writes the C header for `data` on `output`.
///
/// The document ends at `#endif` with no trailing newline.
pub fn generate_header(
    name: &Identifier,
    data: &[u8],
    mut output: impl Write,
) -> io::Result<()> {
    let guard = name.guard();
    writeln!(output, "#ifndef {}", guard)?;
    writeln!(output, "#define {}", guard)?;
    writeln!(output)?;

    writeln!(output, "const unsigned char {}[] = {{", name.array_symbol())?;
    write!(output, "    ")?;
    for (i, byte) in data.iter().enumerate() {
        if i != 0 {
            write!(output, ", ")?;
        }
        write!(output, "0x{:02X}", byte)?;
    }
    writeln!(output)?;
    writeln!(output, "}};")?;
    writeln!(output)?;

    writeln!(
        output,
        "const unsigned int {} = {};",
        name.size_symbol(),
        data.len()
    )?;
    writeln!(output)?;
    write!(output, "#endif")?;

    Ok(())
}

/// Produces the same document as [`generate_header`], in memory.
pub fn render_header(name: &Identifier, data: &[u8]) -> String {
    // "0xHH, " per byte plus the fixed framing.
    let mut buf = Vec::with_capacity(data.len() * 6 + 256);
    generate_header(name, data, &mut buf)
        .expect("writing to a Vec cannot fail");
    // The framing and hex digits are ASCII and the identifier came from a
    // `str`, so the whole document is UTF-8.
    String::from_utf8(buf).expect("header text is UTF-8")
}

/// One font to convert.
#[derive(Clone, Debug)]
pub struct ConvertRequest {
    pub input: PathBuf,
    /// Directory for the header. `None` writes `<name>.h` relative to the
    /// current directory.
    pub out_dir: Option<PathBuf>,
}

impl ConvertRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        ConvertRequest {
            input: input.into(),
            out_dir: None,
        }
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }
}

/// Result of a successful conversion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    pub output: PathBuf,
    pub name: Identifier,
    pub byte_count: usize,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Generated '{}' with array '{}' ({} bytes).",
            self.output.display(),
            self.name.array_symbol(),
            self.byte_count
        )
    }
}

/// Validates, reads and converts a single font, overwriting any existing
/// header at the derived output path.
pub fn convert(request: &ConvertRequest) -> Result<Report, Error> {
    let input = &request.input;
    validate_input(input)?;
    let name = Identifier::from_path(input)
        .ok_or_else(|| Error::InvalidFormat(input.clone()))?;

    let data = fs::read(input).map_err(|e| Error::io(input, e))?;
    debug!("read {} bytes from {}", data.len(), input.display());

    match sfnt::probe(&data) {
        Some(header) => debug!("{}: {}", input.display(), header),
        None => warn!(
            "{} does not start with an sfnt header; embedding it anyway",
            input.display()
        ),
    }

    let output = match &request.out_dir {
        Some(dir) => dir.join(name.header_file_name()),
        None => PathBuf::from(name.header_file_name()),
    };

    let file = File::create(&output).map_err(|e| Error::io(&output, e))?;
    let mut writer = BufWriter::new(file);
    generate_header(&name, &data, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::io(&output, e))?;
    info!("wrote {}", output.display());

    Ok(Report {
        output,
        name,
        byte_count: data.len(),
    })
}
