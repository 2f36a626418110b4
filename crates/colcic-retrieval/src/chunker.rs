/// Splits extracted document text into non-overlapping fixed-size
/// character windows. The window is counted in characters, never bytes,
/// so multibyte Portuguese text is never cut mid-character.
pub fn split_text(text: &str, chunk_size: usize) -> Vec<String> {
    if chunk_size == 0 || text.is_empty() {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk_size)
        .map(|window| window.iter().collect::<String>())
        .filter(|part| !part.trim().is_empty())
        .collect()
}
