//! Startup banner: "DESIGN STUDIO" in a warm gradient, then address and routes.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};
use std::net::SocketAddr;

/// Terracotta (#e2725b).
const TERRACOTTA: (u8, u8, u8) = (0xe2, 0x72, 0x5b);
/// Sand (#f4d6a0).
const SAND: (u8, u8, u8) = (0xf4, 0xd6, 0xa0);

const ROUTES: [(&str, &str, &str); 4] = [
    ("POST", "/api/generate-design", "Generate design concepts"),
    ("GET ", "/api/health", "Health check"),
    ("GET ", "/api/use-cases", "Supported use cases"),
    ("GET ", "/", "Liveness"),
];

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Route table shown under the banner.
fn route_lines() -> Vec<String> {
    ROUTES
        .iter()
        .map(|(method, path, what)| format!("  {} {:<22} {}", method, path, what))
        .collect()
}

/// Prints the welcome banner with the listen address and available routes.
/// Falls back to plain text when the figlet font cannot render.
pub fn print_welcome(addr: SocketAddr) {
    let mut out = stdout();
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("DESIGN STUDIO").map(|f| f.to_string()))
        .unwrap_or_else(|| "DESIGN STUDIO\n".to_string());
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(TERRACOTTA, SAND, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: SAND.0,
        g: SAND.1,
        b: SAND.2,
    }));
    let _ = out.execute(Print(format!(
        "v{}  listening on http://{}\r\n",
        env!("CARGO_PKG_VERSION"),
        addr
    )));
    let _ = out.execute(ResetColor);
    for line in route_lines() {
        let _ = out.execute(Print(format!("{}\r\n", line)));
    }
    let _ = out.flush();
}
