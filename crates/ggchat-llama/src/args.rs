//! Command-line argument construction for `llama-server`.

use ggchat_core::EngineConfig;
use std::path::Path;

/// Build the argument vector for one server invocation.
pub fn build_server_args(
    model_path: &Path,
    config: &EngineConfig,
    host: &str,
    port: u16,
) -> Vec<String> {
    let mut args = vec![
        "-m".to_string(),
        model_path.display().to_string(),
        "--host".to_string(),
        host.to_string(),
        "--port".to_string(),
        port.to_string(),
        "--ctx-size".to_string(),
        config.context_length.to_string(),
        "--n-gpu-layers".to_string(),
        config.gpu_layers.to_string(),
    ];

    if config.use_mlock {
        args.push("--mlock".to_string());
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn args_carry_the_fixed_policy_values() {
        let config = EngineConfig::default();
        let args = build_server_args(
            &PathBuf::from("/models/model-Q2_K.gguf"),
            &config,
            "127.0.0.1",
            5511,
        );

        let joined = args.join(" ");
        assert!(joined.contains("-m /models/model-Q2_K.gguf"));
        assert!(joined.contains("--host 127.0.0.1"));
        assert!(joined.contains("--port 5511"));
        assert!(joined.contains("--ctx-size 2048"));
        assert!(joined.contains("--n-gpu-layers 1"));
        assert!(joined.contains("--mlock"));
    }

    #[test]
    fn mlock_is_omitted_when_disabled() {
        let config = EngineConfig {
            use_mlock: false,
            ..EngineConfig::default()
        };
        let args = build_server_args(&PathBuf::from("m.gguf"), &config, "127.0.0.1", 8080);
        assert!(!args.contains(&"--mlock".to_string()));
    }
}
