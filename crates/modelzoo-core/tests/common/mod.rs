use modelzoo_core::Store;

/// Create a store holding `names.len()` users; returns their ids in order
#[allow(dead_code)]
pub fn store_with_users(names: &[&str]) -> (Store, Vec<i64>) {
    let mut store = Store::new();
    let ids = names
        .iter()
        .map(|name| store.create_user(name).unwrap().id)
        .collect();
    (store, ids)
}

/// Names of the given users, in order
#[allow(dead_code)]
pub fn names(users: &[modelzoo_core::TwitterUser]) -> Vec<String> {
    users.iter().map(|u| u.name.clone()).collect()
}
