//! File name normalization.
//!
//! Turns an arbitrary file or folder name into an ASCII-safe one: Cyrillic
//! letters (Russian and Ukrainian alphabets) are romanized, everything else
//! that is not an ASCII letter, digit or dot becomes an underscore.
//!
//! # Examples
//!
//! ```
//! use clean_folder::normalize::normalize;
//!
//! assert_eq!(normalize("фото.JPG"), "foto.JPG");
//! assert_eq!(normalize("Звіт 2024.docx"), "Zvit_2024.docx");
//! assert_eq!(normalize(".bashrc"), "_bashrc");
//! ```

/// Latin romanization of a lowercase Cyrillic letter.
///
/// Ukrainian letters follow their usual romanization (`я` is `ja`, `є` is
/// `je`, `і` is `i`). This intentionally differs from the legacy clean-folder
/// script, whose table was shifted by one around `я`, so names containing
/// these letters come out differently than they did with that script.
fn latin_for(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "j",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ja",
        'є' => "je",
        'і' => "i",
        'ї' => "ji",
        'ґ' => "g",
        _ => return None,
    };
    Some(latin)
}

/// Looks up the romanization of a single character, if it is Cyrillic.
///
/// Uppercase letters map to the uppercased romanization, so `Ч` becomes `CH`.
fn romanize(c: char) -> Option<String> {
    if let Some(latin) = latin_for(c) {
        return Some(latin.to_string());
    }

    let lower = c.to_lowercase().next()?;
    if lower == c {
        return None;
    }
    latin_for(lower).map(str::to_uppercase)
}

/// Replaces every Cyrillic letter with its Latin romanization.
///
/// Characters outside the table pass through unchanged.
pub fn transliterate(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match romanize(c) {
            Some(latin) => out.push_str(&latin),
            None => out.push(c),
        }
    }
    out
}

/// Replaces every character that is not an ASCII letter, digit, dot or
/// underscore with `_`. Never returns an empty string.
fn sanitize(text: &str, keep_dots: bool) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || (keep_dots && c == '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

/// Normalizes a file or folder name.
///
/// A leading dot is turned into an underscore first, so dotfiles keep their
/// whole name as the stem. The name is then split at its last dot: the stem
/// is transliterated and sanitized, the extension is reattached unchanged.
/// A name without an extension is sanitized as a whole.
pub fn normalize(name: &str) -> String {
    let name = match name.strip_prefix('.') {
        Some(rest) => format!("_{rest}"),
        None => name.to_string(),
    };

    match name.rsplit_once('.') {
        Some((stem, ext)) => {
            format!("{}.{}", sanitize(&transliterate(stem), true), ext)
        }
        None => sanitize(&transliterate(&name), false),
    }
}
