use serde::Serialize;

/// Separates the instructions from the source text in every chunk prompt.
const SOURCE_MARKER: &str = "\n\n---\n";

/// Output style requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    #[default]
    Tldr,
    Keypoints,
    Eli5,
}

impl SummaryMode {
    /// Unrecognized values fall back to [`SummaryMode::Tldr`].
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "keypoints" => Self::Keypoints,
            "eli5" => Self::Eli5,
            _ => Self::Tldr,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tldr => "tldr",
            Self::Keypoints => "keypoints",
            Self::Eli5 => "eli5",
        }
    }

    fn instructions(self) -> &'static str {
        match self {
            Self::Keypoints => {
                "Summarize the following text into only 5–8 crisp bullet points. \
                 Do not add any closing statements, commentary, or extra text. \
                 Only output the bullet points."
            }
            Self::Eli5 => {
                "Explain simply in ≤200 words. Include a tiny concrete example if helpful."
            }
            Self::Tldr => {
                "Write a clear TL;DR (120–180 words) covering the central thesis, \
                 main arguments, and conclusions."
            }
        }
    }
}

/// Wrap one chunk of source text with the instructions for `mode`.
pub fn build_prompt(chunk: &str, mode: SummaryMode) -> String {
    let instructions = mode.instructions();
    let mut prompt = String::with_capacity(instructions.len() + SOURCE_MARKER.len() + chunk.len());
    prompt.push_str(instructions);
    prompt.push_str(SOURCE_MARKER);
    prompt.push_str(chunk);
    prompt
}

/// Ask the model to fold per-chunk summaries, in order, into one summary.
pub fn build_merge_prompt<S: AsRef<str>>(partials: &[S]) -> String {
    let notes = partials
        .iter()
        .map(|p| format!("- {}", p.as_ref()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Combine these notes into one cohesive summary (150–200 words), \
         avoiding repetition but preserving key details:\n\n{notes}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHUNK: &str = "Rust guarantees memory safety without a garbage collector.";

    #[test]
    fn test_every_mode_ends_with_chunk() {
        for mode in [SummaryMode::Tldr, SummaryMode::Keypoints, SummaryMode::Eli5] {
            let prompt = build_prompt(CHUNK, mode);
            assert!(prompt.ends_with(&format!("---\n{CHUNK}")), "{mode:?}: {prompt}");
        }
    }

    #[test]
    fn test_mode_specific_phrasing() {
        let keypoints = build_prompt(CHUNK, SummaryMode::Keypoints);
        assert!(keypoints.contains("5–8"));
        assert!(keypoints.contains("Do not add any closing statements"));

        assert!(build_prompt(CHUNK, SummaryMode::Eli5).contains("200 words"));
        assert!(build_prompt(CHUNK, SummaryMode::Tldr).contains("120–180 words"));
    }

    #[test]
    fn test_unrecognized_mode_falls_back_to_tldr() {
        assert_eq!(SummaryMode::parse_lenient("haiku"), SummaryMode::Tldr);
        assert_eq!(SummaryMode::parse_lenient(""), SummaryMode::Tldr);
        assert_eq!(SummaryMode::parse_lenient(" KeyPoints "), SummaryMode::Keypoints);
        assert_eq!(SummaryMode::parse_lenient("eli5"), SummaryMode::Eli5);

        assert_eq!(
            build_prompt(CHUNK, SummaryMode::parse_lenient("haiku")),
            build_prompt(CHUNK, SummaryMode::Tldr)
        );
    }

    #[test]
    fn test_merge_prompt_lists_partials_in_order() {
        let prompt = build_merge_prompt(&["first", "second", "third"]);
        assert!(prompt.contains("150–200 words"));
        assert!(prompt.ends_with("- first\n\n- second\n\n- third"));
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SummaryMode::Eli5).unwrap(), "\"eli5\"");
        assert_eq!(SummaryMode::Keypoints.as_str(), "keypoints");
    }
}
