use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use patron_core::Analysis;
use patron_core::catalog::{DAILY, TRADITIONAL};
use patron_core::models::Draw;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn display_header(lottery: Option<&str>, date: &str) {
    match lottery {
        Some(name) => println!("\n🎯 Analyse {} (au {})\n", name, date),
        None => println!("\n🎯 Analyse (au {})\n", date),
    }
}

pub fn display_insufficient(found: usize, required: usize) {
    println!(
        "Historique insuffisant : {} tirage(s), minimum {}. Ajoutez des résultats.",
        found, required
    );
}

pub fn display_latest(draws: &[Draw]) {
    let labels = ["Actuel", "Précédent", "Antérieur"];
    let mut table = new_table();
    table.set_header(labels.iter().take(draws.len().min(3)).copied().collect::<Vec<_>>());
    table.add_row(draws.iter().take(3).map(|d| d.full.as_str()).collect::<Vec<_>>());
    println!("── Derniers tirages ──");
    println!("{table}");
}

pub fn display_pairs(analysis: &Analysis) {
    let mut table = new_table();
    table.set_header(vec!["Paire A", "Paire B", "Paire C"]);
    table.add_row(vec![
        analysis.pair_a.to_string(),
        analysis.pair_b.to_string(),
        analysis.pair_c.to_string(),
    ]);
    println!("{table}");
}

pub fn display_digit_stats(analysis: &Analysis) {
    let stats = &analysis.group_c.all;
    let max_freq = stats.iter().map(|s| s.frequency).max().unwrap_or(0);
    let max_delay = stats.iter().map(|s| s.delay).max().unwrap_or(0);

    let mut table = new_table();
    table.set_header(vec!["Chiffre", "Fréquence", "Retard"]);
    for stat in stats {
        let freq = Cell::new(stat.frequency);
        let delay = Cell::new(stat.delay);
        table.add_row(vec![
            Cell::new(stat.digit),
            if stat.frequency == max_freq { freq.fg(Color::Green) } else { freq },
            if stat.delay == max_delay { delay.fg(Color::Red) } else { delay },
        ]);
    }
    println!("\n── Statistiques des chiffres ({} tirages) ──", analysis.history.len());
    println!("{table}");
}

pub fn display_groups(analysis: &Analysis) {
    println!("\n── Groupe A (paires du dernier tirage) ──");
    let mut table = new_table();
    table.set_header(vec!["#", "Paire", "Position", "Fréq. cumulée", "Occurrences"]);
    for (i, a) in analysis.group_a.iter().enumerate() {
        table.add_row(vec![
            format!("A{}", i + 1),
            a.pair.to_string(),
            a.slot.to_string(),
            a.frequency.to_string(),
            a.occurrences.to_string(),
        ]);
    }
    println!("{table}");

    let b = &analysis.group_b;
    let c = &analysis.group_c;
    println!("Groupe B (rattrapage) : {} et {}", b.b1, b.b2);
    println!("Groupe C (retardataires) : {} et {}", c.c1, c.c2);

    println!("\n── Groupe D (B × C) ──");
    let mut table = new_table();
    table.set_header(vec!["#", "Paire", "Position", "Retard cumulé", "Occurrences"]);
    for (i, d) in analysis.group_d.iter().enumerate() {
        table.add_row(vec![
            format!("D{}", i + 1),
            d.pair.to_string(),
            d.slot.to_string(),
            d.delay.to_string(),
            d.occurrences.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_matrix(analysis: &Analysis) {
    let top = analysis.top_frequency_digit;
    let mut table = new_table();

    let mut header = vec![Cell::new("")];
    header.extend(
        analysis
            .group_d
            .iter()
            .enumerate()
            .map(|(i, d)| Cell::new(format!("D{} ({})", i + 1, d.pair))),
    );
    table.set_header(header);

    for (i, row) in analysis.matrix.iter().enumerate() {
        let mut cells = vec![Cell::new(format!("A{} ({})", i + 1, analysis.group_a[i].pair))];
        for (j, candidate) in row.iter().enumerate() {
            let cell = Cell::new(candidate.to_string());
            let cell = if i == j {
                cell.fg(Color::Yellow).add_attribute(Attribute::Bold)
            } else if candidate.contains(top) {
                cell.fg(Color::White)
            } else {
                cell.fg(Color::DarkGrey)
            };
            cells.push(cell);
        }
        table.add_row(cells);
    }

    println!("\n── Matrice {}x{} ──", analysis.matrix.len(), analysis.group_d.len());
    println!("{table}");
}

pub fn display_patterns(analysis: &Analysis) {
    let p = &analysis.patterns;
    let mut table = new_table();
    table.set_header(vec!["Motif", "Valeur", "Lecture"]);
    table.add_row(vec![
        "Pachas".to_string(),
        format!("{:.0}%", p.pacha_rate),
        p.pacha_prediction.to_string(),
    ]);
    table.add_row(vec![
        "Répétition (2+ chiffres)".to_string(),
        format!("{:.0}%", p.repetition_rate),
        p.repetition_prediction.to_string(),
    ]);
    table.add_row(vec![
        "Position d'origine".to_string(),
        format!("{:.0}%", p.origin.percent),
        p.origin.slot.to_string(),
    ]);
    table.add_row(vec![
        "Position de destination".to_string(),
        format!("{:.0}%", p.target.percent),
        p.target.slot.to_string(),
    ]);
    table.add_row(vec![
        "Groupes A / B / C".to_string(),
        format!("{:.0}% / {:.0}% / {:.0}%", p.groups.a, p.groups.b, p.groups.c),
        format!("Force des groupes {} et {}", p.groups.prediction[0], p.groups.prediction[1]),
    ]);

    println!("\n── Audit des motifs ──");
    println!("{table}");
}

pub fn display_backtest(analysis: &Analysis) {
    let hits = &analysis.backtest;
    println!(
        "\n── Vérification sur {} tirages : {} à 4 chiffres, {} à 3 chiffres ──",
        hits.total, hits.hits4, hits.hits3
    );
}

pub fn display_choices(analysis: &Analysis) {
    println!("\n👑 3 choix maîtres\n");
    let mut table = new_table();
    table.set_header(vec!["#", "Numéro", "Score", "Pacha"]);
    for (i, choice) in analysis.master_choices.iter().enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            choice.candidate.to_string(),
            format!("{:.2}", choice.score),
            if choice.candidate.is_pacha() { "oui" } else { "non" }.to_string(),
        ]);
    }
    println!("{table}");

    if let Some(pick) = analysis.diagonal_pick {
        println!("Choix de la diagonale : {}", pick);
    }

    let mut table = new_table();
    table.set_header(vec!["🔥 Choix final"]);
    table.add_row(vec![
        Cell::new(analysis.final_choice.to_string())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    ]);
    println!("\n{table}");
}

pub fn display_analysis(analysis: &Analysis) {
    display_pairs(analysis);
    display_latest(&analysis.history);
    display_digit_stats(analysis);
    display_groups(analysis);
    display_matrix(analysis);
    display_patterns(analysis);
    display_backtest(analysis);
    display_choices(analysis);
}

pub fn display_lotteries() {
    println!("\n── Nationales ──");
    let mut table = new_table();
    table.set_header(vec!["Jour", "Loteries"]);
    for weekday in TRADITIONAL {
        table.add_row(vec![weekday.day.to_string(), weekday.lotteries.join(", ")]);
    }
    println!("{table}");

    println!("\n── Quotidiennes ──");
    let mut table = new_table();
    table.set_header(vec!["Loterie"]);
    for name in DAILY {
        table.add_row(vec![*name]);
    }
    println!("{table}");
}
