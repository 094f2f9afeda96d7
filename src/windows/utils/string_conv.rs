//! String conversion utilities for Windows API

/// Convert a Rust string to a null-terminated wide string (UTF-16)
pub fn string_to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Convert Windows wide string (UTF-16) to Rust string, stopping at the first null
pub fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

/// Extract filename from full path
pub fn extract_filename(path: &str) -> String {
    path.rsplit(['\\', '/']).next().unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_wide() {
        let wide = string_to_wide("Hello");
        assert_eq!(wide, vec![72, 101, 108, 108, 111, 0]);

        let empty = string_to_wide("");
        assert_eq!(empty, vec![0]);
    }

    #[test]
    fn test_wide_to_string() {
        let wide = vec![72, 101, 108, 108, 111, 0];
        assert_eq!(wide_to_string(&wide), "Hello");

        let no_null = vec![72, 101, 108, 108, 111];
        assert_eq!(wide_to_string(&no_null), "Hello");
    }

    #[test]
    fn test_extract_filename() {
        assert_eq!(
            extract_filename("C:\\Windows\\System32\\kernel32.dll"),
            "kernel32.dll"
        );
        assert_eq!(extract_filename("C:/MO2/ModOrganizer.exe"), "ModOrganizer.exe");
        assert_eq!(extract_filename("kernel32.dll"), "kernel32.dll");
        assert_eq!(extract_filename(""), "");
    }

    #[test]
    fn test_path_edge_cases() {
        assert_eq!(extract_filename("C:\\"), "");
        assert_eq!(extract_filename("\\\\server\\share\\file.txt"), "file.txt");
        assert_eq!(extract_filename("\\\\?\\C:\\MO2\\ModOrganizer.exe"), "ModOrganizer.exe");
    }

    #[test]
    fn test_unicode_strings() {
        let unicode_str = "Mod Organizer 世界 🌍.exe";
        let wide = string_to_wide(unicode_str);
        assert_eq!(wide_to_string(&wide), unicode_str);
    }
}
