// Application layer: concrete archivers behind the `Archiver` port.

pub mod archivers;
