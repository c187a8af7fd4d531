//! Name uniquification
//!
//! Two listings bound to directories with the same display form get
//! `name`, `name<2>`, `name<3>`, ...

/// First numeric suffix handed out on a collision
pub const UNIQUE_SUFFIX_START: usize = 2;

/// Returns `base` if it is free, otherwise the first free `base<N>`
///
/// `taken` reports whether a candidate name is already held.
pub fn uniquify<F>(base: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !taken(base) {
        return base.to_string();
    }

    let mut suffix = UNIQUE_SUFFIX_START;
    loop {
        let candidate = format!("{}<{}>", base, suffix);
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
