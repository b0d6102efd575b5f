use phf::phf_map;

pub const MID_TERM_SCORE: &str = "mid_term_score";
pub const EXAM_SCORE: &str = "exam_score";
pub const TOTAL_SCORE: &str = "total_score";

/// Header labels as teachers write them, mapped to the names used internally
/// and by the report layer.
static EXTERNAL_TO_INTERNAL: phf::Map<&'static str, &'static str> = phf_map! {
    "mid" => MID_TERM_SCORE,
    "exam" => EXAM_SCORE,
    "total" => TOTAL_SCORE,
    "mid %" => "mid term %",
    "mid total" => "mid term total",
    "sim %" => "sum total %",
    "sum %" => "sum total %",
    "1st term" => "1st term total",
    "2nd term" => "2nd term total",
    "3rd term" => "3rd term total",
    "cumtotal" => "cumulative (session) total",
    "av. total" => "average total",
    "av. %" => "average %",
};

/// Trims and lower-cases a header label, then maps it through the synonym
/// table. Unknown labels come back normalized but otherwise unchanged.
pub fn to_internal(raw: &str) -> String {
    let normalized = raw.trim().to_lowercase();
    match EXTERNAL_TO_INTERNAL.get(normalized.as_str()) {
        Some(internal) => (*internal).to_string(),
        None => normalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_labels_case_and_space_insensitively() {
        assert_eq!(to_internal("  MID  "), "mid_term_score");
        assert_eq!(to_internal("Exam"), "exam_score");
        assert_eq!(to_internal("TOTAL"), "total_score");
        assert_eq!(to_internal("CumTotal"), "cumulative (session) total");
        assert_eq!(to_internal("Sim %"), "sum total %");
        assert_eq!(to_internal("Av. %"), "average %");
    }

    #[test]
    fn passes_unknown_labels_through_normalized() {
        assert_eq!(to_internal("unknown header"), "unknown header");
        assert_eq!(to_internal(" Mathematics "), "mathematics");
        // no partial matching
        assert_eq!(to_internal("mid term"), "mid term");
    }
}
