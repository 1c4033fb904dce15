use eframe::egui::{self, RichText, Ui};

const SECTIONS: &[(&str, &[&str])] = &[
    (
        "Overview",
        &["This dashboard summarises recorded orders and sales. Use the side panel to \
           narrow the view to one region, one category and a purchase date range."],
    ),
    (
        "Findings",
        &[
            "The category bar chart shows which categories bring in the most revenue.",
            "The sales-over-time line exposes seasonal trends and demand peaks.",
            "The per-order metric histogram shows where order values concentrate.",
            "The orders-by-region chart highlights the most active regions in the whole dataset.",
        ],
    ),
    (
        "Analysis",
        &["A few regions and categories account for most of the revenue, and sales show \
           distinct seasonal peaks. The spread of the per-order metric points at where \
           pricing and basket size can be improved."],
    ),
    (
        "Recommendations",
        &[
            "Focus commercial effort on the regions and categories with the most potential.",
            "Plan inventory and logistics around the demand peaks.",
            "Study the most profitable customer segments to tailor offers.",
        ],
    ),
];

/// Static narrative tab.
pub fn narrative_tab(ui: &mut Ui) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Analysis narrative");
            ui.add_space(8.0);
            for (title, paragraphs) in SECTIONS {
                ui.label(RichText::new(*title).strong().size(16.0));
                if paragraphs.len() == 1 {
                    ui.label(paragraphs[0]);
                } else {
                    for item in paragraphs.iter() {
                        ui.label(format!("• {item}"));
                    }
                }
                ui.add_space(10.0);
            }
        });
}
