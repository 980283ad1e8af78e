//! Binary STL (stereolithography) output.
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```

use std::io::{self, Write};

use crate::error::Result;
use crate::tessellation::Mesh;

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Writes `mesh` as binary STL with per-triangle unit normals.
///
/// # Errors
///
/// Returns an I/O error if writing fails or the mesh has more triangles than
/// the format can count.
#[allow(clippy::cast_possible_truncation)]
pub fn write_stl_binary<W: Write>(mesh: &Mesh, mut writer: W) -> Result<()> {
    let mut header = [b' '; HEADER_SIZE];
    let text = b"Binary STL generated by lithomesh";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;

    let count = u32::try_from(mesh.len()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "too many triangles for STL")
    })?;
    writer.write_all(&count.to_le_bytes())?;

    let mut record = [0u8; TRIANGLE_SIZE];
    for triangle in mesh {
        let normal = triangle.normal();
        let [a, b, c] = triangle.vertices;
        let values = [
            normal.x, normal.y, normal.z, a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z,
        ];
        for (slot, value) in record.chunks_exact_mut(4).zip(values) {
            slot.copy_from_slice(&(value as f32).to_le_bytes());
        }
        record[48..].copy_from_slice(&0u16.to_le_bytes());
        writer.write_all(&record)?;
    }
    writer.flush()?;
    Ok(())
}

impl Mesh {
    /// Encodes the mesh as an in-memory binary STL.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh has more triangles than STL can count.
    pub fn to_stl_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + 4 + self.len() * TRIANGLE_SIZE);
        write_stl_binary(self, &mut bytes)?;
        Ok(bytes)
    }
}
