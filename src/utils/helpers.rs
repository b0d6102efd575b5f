#[must_use]
pub fn index_to_col_name(index: usize) -> String {
    let mut col_name = String::new();
    let mut n = index;

    while n > 0 {
        let remainder = (n - 1) % 26;
        col_name.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }

    if col_name.is_empty() {
        col_name.push('A');
    }

    col_name
}

#[must_use]
pub fn col_name_to_index(name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }

    let mut result = 0;

    for c in name.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }

        let val = (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        result = result * 26 + val;
    }

    Some(result)
}

/// Parses a column given either as a 1-based number ("300") or letters ("KN").
pub fn parse_column(value: &str) -> Result<usize, String> {
    let value = value.trim();
    let index = match value.parse::<usize>() {
        Ok(index) => Some(index),
        Err(_) => col_name_to_index(value),
    };

    match index {
        Some(index) if index > 0 => Ok(index),
        _ => Err(format!("not a column: {}", value)),
    }
}

// Format cell reference (e.g., A1, B2)
#[must_use]
pub fn cell_reference(cell: (usize, usize)) -> String {
    format!("{}{}", index_to_col_name(cell.1), cell.0)
}

/// Title-cases text: a letter is upper-cased when it follows a non-letter
/// and lower-cased otherwise ("mary-jane o'neil" -> "Mary-Jane O'Neil").
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_cased = false;

    for c in text.chars() {
        if previous_is_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_is_cased = c.is_alphabetic();
    }

    out
}

#[must_use]
pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
