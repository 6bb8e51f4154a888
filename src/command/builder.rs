use crate::registry::NetworkConfig;

/// Exact-token membership test on an argument list.
///
/// Substring matches do not count: `--node-id` is not `--node`.
fn has_token(args: &[String], token: &str) -> bool {
    args.iter().any(|arg| arg == token)
}

/// Inject the network flags a command is missing
///
/// Each rule is applied independently and never injects a flag already
/// present, so applying the builder to its own output changes nothing:
/// 1. `query` commands get `--node <url>`
/// 2. `tx` commands get `--chain-id <id>`
/// 3. `keys` and `tx` commands get `--keyring-backend <backend>`
/// 4. `keys` and `tx` commands get `--home <dir>`
/// 5. every command gets `--output json`
///
/// The returned vector is the base arguments followed by the injected flags
/// in rule order; the binary path is prepended by the executor.
pub fn build_args(base: &[String], network: &NetworkConfig) -> Vec<String> {
    let mut args = base.to_vec();
    let touches_keys = has_token(base, "keys") || has_token(base, "tx");

    if has_token(base, "query") && !has_token(base, "--node") {
        args.push("--node".to_string());
        args.push(network.node_url.clone());
    }
    if has_token(base, "tx") && !has_token(base, "--chain-id") {
        args.push("--chain-id".to_string());
        args.push(network.chain_id.clone());
    }
    if touches_keys && !has_token(base, "--keyring-backend") {
        args.push("--keyring-backend".to_string());
        args.push(network.keyring_backend.clone());
    }
    if touches_keys && !has_token(base, "--home") {
        args.push("--home".to_string());
        args.push(network.home_dir.clone());
    }
    if !has_token(base, "--output") {
        args.push("--output".to_string());
        args.push("json".to_string());
    }

    args
}
