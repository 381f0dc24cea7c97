use crate::domain::FileListing;

/// Parse a `/getFiles/` body: one filename per line.
///
/// Blank lines are dropped, everything else is kept verbatim and in order,
/// duplicates included.
pub fn parse(body: &str) -> FileListing {
    let names = body
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    FileListing::new(names)
}
