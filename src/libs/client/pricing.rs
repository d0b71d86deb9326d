//! Fixed delivery costs shown next to the compose form.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostLine {
    pub label: &'static str,
    pub kopecks: u32,
}

pub const COST_LINES: [CostLine; 3] = [
    CostLine {
        label: "Конверт: Конверт стандарт",
        kopecks: 65,
    },
    CostLine {
        label: "Отправка письма",
        kopecks: 300,
    },
    CostLine {
        label: "Открытка",
        kopecks: 0,
    },
];

pub fn total_kopecks() -> u32 {
    COST_LINES.iter().map(|line| line.kopecks).sum()
}

/// `365` → `3,65 руб.`, `300` → `3 руб.`
pub fn format_rubles(kopecks: u32) -> String {
    let (rubles, rest) = (kopecks / 100, kopecks % 100);
    if rest == 0 {
        format!("{rubles} руб.")
    } else {
        format!("{rubles},{rest:02} руб.")
    }
}
