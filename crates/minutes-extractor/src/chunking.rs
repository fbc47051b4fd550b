//! Transcript chunking for large inputs
//!
//! Splits long text into overlapping chunks, preferring paragraph breaks
//! (double newlines) near the end of each chunk so related paragraphs stay
//! together.

/// Split a transcript into overlapping chunks.
///
/// Text at or under `max_size` is returned as a single chunk. Otherwise
/// each chunk ends at `start + max_size`, pulled back to just after the
/// last paragraph break found in the final quarter of the chunk when one
/// exists past `start`. The next chunk starts `overlap` characters before
/// the previous end; when that would not advance (short chunk after a
/// paragraph cut, or `overlap >= max_size`), the overlap is dropped for
/// that boundary so the walk always makes forward progress.
pub fn chunk_transcript(text: &str, max_size: usize, overlap: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < text.len() {
        let mut end = (start + max_size).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        // A max_size smaller than one character would pin end to start;
        // widen to the next boundary to keep the walk moving.
        if end <= start {
            end = start + 1;
            while !text.is_char_boundary(end) {
                end += 1;
            }
        }

        if end < text.len() {
            let mut search_start = start.max(end.saturating_sub(max_size / 4));
            while !text.is_char_boundary(search_start) {
                search_start += 1;
            }
            if let Some(pos) = text[search_start..end].rfind("\n\n") {
                let para_break = search_start + pos;
                if para_break > start {
                    end = para_break + 2; // keep the double newline with the chunk
                }
            }
        }

        chunks.push(text[start..end].to_string());

        let mut next_start = end.saturating_sub(overlap);
        while !text.is_char_boundary(next_start) {
            next_start += 1;
        }
        if next_start <= start {
            next_start = end; // no overlap if the chunk was too small
        }
        start = next_start;
    }

    chunks
}
