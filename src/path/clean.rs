/// Removes superfluous elements from a request path.
///
/// Duplicate slashes collapse, `.` segments disappear, `..` segments drop
/// the previous segment (never climbing above the root), a missing leading
/// slash is added and a meaningful trailing slash survives. Used to repair
/// paths before case-insensitive redirect recovery.
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let bytes = path.as_bytes();
    let n = bytes.len();
    let trailing = n > 1 && bytes[n - 1] == b'/';

    let mut out = String::with_capacity(n + 1);
    out.push('/');
    let mut r = usize::from(bytes[0] == b'/');

    while r < n {
        if bytes[r] == b'/' {
            // empty segment
            r += 1;
        } else if bytes[r] == b'.' && (r + 1 == n || bytes[r + 1] == b'/') {
            // "." segment
            r += 1;
        } else if bytes[r] == b'.' && bytes[r + 1] == b'.' && (r + 2 == n || bytes[r + 2] == b'/') {
            // ".." segment: drop the last emitted segment, keep the root
            r += 2;
            if out.len() > 1 {
                if let Some(pos) = out.rfind('/') {
                    out.truncate(pos.max(1));
                }
            }
        } else {
            if out.len() > 1 {
                out.push('/');
            }
            let seg = r;
            while r < n && bytes[r] != b'/' {
                r += 1;
            }
            out.push_str(&path[seg..r]);
        }
    }

    if trailing && out.len() > 1 {
        out.push('/');
    }
    out
}
