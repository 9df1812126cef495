/*!

  Utils for schematic development.

*/

/// Compare SVG documents as strings up to indentation.
#[macro_export]
macro_rules! assert_svg_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                let left_lines: Vec<&str> = left_val.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
                let right_lines: Vec<&str> = right_val.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
                for (left_line, right_line) in left_lines.iter().zip(right_lines.iter()) {
                    assert_eq!(left_line, right_line);
                }
                assert_eq!(left_lines.len(), right_lines.len(), "documents differ in length");
            }
        }
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                let left_lines: Vec<&str> = left_val.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
                let right_lines: Vec<&str> = right_val.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
                for (left_line, right_line) in left_lines.iter().zip(right_lines.iter()) {
                    assert_eq!(
                        left_line,
                        right_line,
                        std::format_args!($($arg)+)
                    );
                }
                assert_eq!(left_lines.len(), right_lines.len(), std::format_args!($($arg)+));
            }
        }
    };
}

/// Returns the `data-wire` tags of every line in an SVG document, in document order
pub fn tagged_wires(svg: &str) -> Vec<&str> {
    svg.match_indices("data-wire=\"")
        .filter_map(|(at, key)| {
            let rest = &svg[at + key.len()..];
            rest.find('"').map(|end| &rest[..end])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #[test]
    fn indentation_is_ignored() {
        crate::assert_svg_eq!("<svg>\n  <g>\n  </g>\n</svg>", "<svg>\n<g>\n    </g>\n</svg>\n");
    }

    #[test]
    #[should_panic]
    fn trailing_content_is_not_ignored() {
        crate::assert_svg_eq!("<svg>\n</svg>", "<svg>\n</svg>\n<svg>");
    }

    #[test]
    fn finds_wire_tags() {
        let svg = r#"<line data-wire="a" /><circle /><line x1="0" data-wire="b&amp;c" />"#;
        assert_eq!(super::tagged_wires(svg), vec!["a", "b&amp;c"]);
    }
}
