pub const ROOT: &str = "root";
pub const SEPARATOR: char = '_';

pub fn child(parent: &str, key: &str) -> String {
    let mut out = String::with_capacity(parent.len() + key.len() + 1);
    out.push_str(parent);
    out.push(SEPARATOR);
    out.push_str(key);
    out
}

/// Array elements keep the array's namespace.
pub fn element(parent: &str) -> String {
    parent.to_string()
}

pub fn element_render_key(parent_key: &str, index: usize) -> String {
    child(parent_key, index.to_string().as_str())
}

pub fn index_qualified(namespace: &str, index: usize) -> String {
    element_render_key(namespace, index)
}

/// Keys to try, most specific first.
pub fn lookup_keys(namespace: &str, index: Option<usize>) -> Vec<String> {
    match index {
        Some(index) => vec![index_qualified(namespace, index), namespace.to_string()],
        None => vec![namespace.to_string()],
    }
}
