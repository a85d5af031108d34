/// File-dump logging macro for inspecting generated Java source and model
/// snapshots during development.
///
/// Writes to `$FORMFORGE_LOG_DIR/<filename>`. When the environment variable
/// is unset the macro is a no-op, so library consumers never pay for it.
///
/// # Examples
///
/// ```no_run
/// # use formforge_core::formforge_log;
/// formforge_log!("DTO update started", "operations.log");
/// ```
///
/// Append instead of truncating:
/// ```no_run
/// # use formforge_core::formforge_log;
/// formforge_log!("PersonFormData written", "operations.log", true);
/// ```
#[macro_export]
macro_rules! formforge_log {
    ($content:expr, $filename:expr) => {{
        $crate::formforge_log!($content, $filename, false);
    }};
    ($content:expr, $filename:expr, $append:expr) => {{
        if let Ok(logs_dir) = std::env::var("FORMFORGE_LOG_DIR") {
            use std::io::Write;

            let _ = std::fs::create_dir_all(&logs_dir);
            let path = std::path::Path::new(&logs_dir).join($filename);

            let mut options = std::fs::OpenOptions::new();
            options.create(true);
            if $append {
                options.append(true);
            } else {
                options.write(true).truncate(true);
            }

            if let Ok(mut file_handle) = options.open(path) {
                let _ = file_handle.write_all(format!("{}\n", $content).as_bytes());
            }
        }
    }};
}
