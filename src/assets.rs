//! Mesh blob loading and the name -> mesh-range index
//!
//! The blob holds three tagged, length-prefixed chunks in fixed order:
//! - `dat0`: packed 28-byte vertex records (position, normal, color)
//! - `str0`: a flat character buffer of concatenated mesh names
//! - `idx0`: 16-byte index records mapping a name range to a vertex range
//!
//! All fields are little-endian. Trailing bytes after the third chunk are
//! tolerated with a warning; every other malformation is a fatal load error.

use std::collections::HashMap;
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// A packed vertex record as stored in the `dat0` chunk
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [u8; 4],
}

const _: () = assert!(std::mem::size_of::<Vertex>() == 28, "Vertex should be packed");

/// Byte size of one `idx0` record (four u32 fields)
const INDEX_ENTRY_SIZE: usize = 16;

/// A range of vertices in the shared vertex buffer, identifying one mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshRef {
    /// First vertex of the mesh
    pub first: u32,
    /// Number of vertices in the mesh
    pub count: u32,
}

/// Errors raised while loading or querying the mesh blob
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read mesh blob: {0}")]
    Io(#[from] std::io::Error),
    #[error("blob truncated while reading '{0}' chunk")]
    Truncated(&'static str),
    #[error("expected chunk tag '{expected}', found '{found}'")]
    TagMismatch { expected: &'static str, found: String },
    #[error("chunk '{tag}' length {len} is not a multiple of {stride}")]
    BadChunkLength {
        tag: &'static str,
        len: usize,
        stride: usize,
    },
    #[error("invalid name indices in index (entry {0})")]
    InvalidNameRange(usize),
    #[error("invalid vertex indices in index (entry {0})")]
    InvalidVertexRange(usize),
    #[error("mesh name in entry {0} is not valid UTF-8")]
    NameEncoding(usize),
    #[error("duplicate name in index: '{0}'")]
    DuplicateName(String),
    #[error("mesh named '{0}' does not appear in index")]
    MissingMesh(String),
}

/// Split the next tagged chunk off the front of `bytes`
fn read_chunk<'a>(bytes: &mut &'a [u8], tag: &'static str) -> Result<&'a [u8], AssetError> {
    let remaining: &'a [u8] = bytes;
    if remaining.len() < 8 {
        return Err(AssetError::Truncated(tag));
    }
    let (header, rest) = remaining.split_at(8);
    if &header[0..4] != tag.as_bytes() {
        return Err(AssetError::TagMismatch {
            expected: tag,
            found: String::from_utf8_lossy(&header[0..4]).into_owned(),
        });
    }
    let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
    if rest.len() < len {
        return Err(AssetError::Truncated(tag));
    }
    let (data, tail) = rest.split_at(len);
    *bytes = tail;
    Ok(data)
}

/// The name -> mesh-range index, plus the vertex data a renderer uploads
///
/// Built once at startup; read-only afterward.
#[derive(Debug, Clone)]
pub struct AssetIndex {
    vertices: Vec<Vertex>,
    index: HashMap<String, MeshRef>,
}

impl AssetIndex {
    /// Parse a complete blob from memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let mut cursor = bytes;

        let vertex_bytes = read_chunk(&mut cursor, "dat0")?;
        if vertex_bytes.len() % std::mem::size_of::<Vertex>() != 0 {
            return Err(AssetError::BadChunkLength {
                tag: "dat0",
                len: vertex_bytes.len(),
                stride: std::mem::size_of::<Vertex>(),
            });
        }
        let vertices: Vec<Vertex> = bytemuck::pod_collect_to_vec(vertex_bytes);

        let names = read_chunk(&mut cursor, "str0")?;

        let entry_bytes = read_chunk(&mut cursor, "idx0")?;
        if entry_bytes.len() % INDEX_ENTRY_SIZE != 0 {
            return Err(AssetError::BadChunkLength {
                tag: "idx0",
                len: entry_bytes.len(),
                stride: INDEX_ENTRY_SIZE,
            });
        }

        if !cursor.is_empty() {
            log::warn!("{} trailing bytes after mesh index chunk", cursor.len());
        }

        let mut index = HashMap::new();
        for (entry, record) in entry_bytes.chunks_exact(INDEX_ENTRY_SIZE).enumerate() {
            let field = |i: usize| {
                u32::from_le_bytes([record[i], record[i + 1], record[i + 2], record[i + 3]])
            };
            let name_begin = field(0) as usize;
            let name_end = field(4) as usize;
            let vertex_begin = field(8);
            let vertex_end = field(12);

            if name_begin > name_end || name_end > names.len() {
                return Err(AssetError::InvalidNameRange(entry));
            }
            if vertex_begin > vertex_end || vertex_end as usize > vertices.len() {
                return Err(AssetError::InvalidVertexRange(entry));
            }

            let name = std::str::from_utf8(&names[name_begin..name_end])
                .map_err(|_| AssetError::NameEncoding(entry))?
                .to_owned();
            let mesh = MeshRef {
                first: vertex_begin,
                count: vertex_end - vertex_begin,
            };
            if index.insert(name.clone(), mesh).is_some() {
                return Err(AssetError::DuplicateName(name));
            }
        }

        log::info!(
            "loaded mesh blob: {} vertices, {} meshes",
            vertices.len(),
            index.len()
        );
        Ok(Self { vertices, index })
    }

    /// Load and parse a blob from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Resolve a mesh by name; unknown names are an error
    pub fn lookup(&self, name: &str) -> Result<MeshRef, AssetError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::MissingMesh(name.to_owned()))
    }

    /// The shared vertex buffer all meshes index into
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of meshes in the index
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// The resolved handles for every mesh the board needs
///
/// Resolving fails if any required name is missing, which aborts startup.
#[derive(Debug, Clone, Copy)]
pub struct MeshSet {
    pub wall: MeshRef,
    pub floor: MeshRef,
    pub starpoint: MeshRef,
    pub hole: MeshRef,
    pub reflector: MeshRef,
    pub goal: MeshRef,
    pub bonus: MeshRef,
    pub player: MeshRef,
}

impl MeshSet {
    /// Look up all required mesh names in the index
    pub fn resolve(index: &AssetIndex) -> Result<Self, AssetError> {
        Ok(Self {
            wall: index.lookup("Wall")?,
            floor: index.lookup("Floor")?,
            starpoint: index.lookup("Starpoint")?,
            hole: index.lookup("Hole")?,
            // Spelling matches the shipped blob
            reflector: index.lookup("Riflector")?,
            goal: index.lookup("Goal")?,
            bonus: index.lookup("Circle")?,
            player: index.lookup("Player")?,
        })
    }
}
