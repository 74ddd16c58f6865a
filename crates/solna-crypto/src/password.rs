#![forbid(unsafe_code)]

//! Password encoding shared by the keystore checksum and key protection.

use zeroize::Zeroizing;

/// Encode a password as big-endian UTF-16 code units, without terminator.
///
/// Characters outside the BMP become surrogate pairs, matching the `char[]`
/// view of the password the format was defined against.
pub fn password_to_utf16be(password: &str) -> Zeroizing<Vec<u8>> {
    let mut out = Zeroizing::new(Vec::with_capacity(password.len() * 2));
    for unit in password.encode_utf16() {
        out.push((unit >> 8) as u8);
        out.push(unit as u8);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_to_utf16be() {
        assert!(password_to_utf16be("").is_empty());

        // "ab" -> 0x00 0x61 0x00 0x62, no trailing zeros
        assert_eq!(*password_to_utf16be("ab"), vec![0x00, 0x61, 0x00, 0x62]);
    }

    #[test]
    fn test_password_non_ascii() {
        // U+00E5 is one code unit; U+20AC has a non-zero high byte.
        assert_eq!(*password_to_utf16be("å€"), vec![0x00, 0xE5, 0x20, 0xAC]);
    }

    #[test]
    fn test_password_surrogate_pair() {
        // U+1F511 encodes as D83D DD11.
        assert_eq!(
            *password_to_utf16be("\u{1F511}"),
            vec![0xD8, 0x3D, 0xDD, 0x11]
        );
    }
}
