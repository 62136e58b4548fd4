//! System clipboard access through the platform's clipboard tool

use std::io::Write;
use std::process::{Command, Stdio};

/// Clipboard tools to try, in order, with the arguments that make them read stdin
#[cfg(target_os = "linux")]
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg(target_os = "macos")]
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[];

/// Copy text to the clipboard, returning whether any tool accepted it
pub fn copy_to_clipboard(text: &str) -> bool {
    CLIPBOARD_TOOLS
        .iter()
        .any(|(tool, args)| pipe_to(tool, args, text))
}

/// Run `tool` with `text` on stdin; true if it exits successfully
fn pipe_to(tool: &str, args: &[&str], text: &str) -> bool {
    let Ok(mut child) = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        return false;
    };

    // stdin is dropped at the end of this statement so the tool sees EOF
    let written = child
        .stdin
        .take()
        .is_some_and(|mut stdin| stdin.write_all(text.as_bytes()).is_ok());

    let exited_ok = child.wait().map(|s| s.success()).unwrap_or(false);
    written && exited_ok
}
