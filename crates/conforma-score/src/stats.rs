//! Per-theme and whole-project completion statistics.

use serde::Serialize;

use conforma_core::{Project, Theme};

use crate::color::ProgressColor;

/// Completion figures for one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeStats {
    /// Theme name.
    pub nome: String,
    /// Percentage of concluded requirements, 0 to 100.
    pub porcentagem: u8,
    /// Color band of `porcentagem`.
    pub cor: ProgressColor,
}

/// Completion figures over every requirement of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverallStats {
    /// Requirement count across all themes.
    pub total: usize,
    /// Concluded requirement count.
    pub concluded: usize,
    /// Pending requirement count.
    pub pending: usize,
    /// Percentage of concluded requirements, 0 to 100.
    pub porcentagem: u8,
    /// Color band of `porcentagem`.
    pub cor: ProgressColor,
}

/// `round(100 * concluded / total)` with halves rounded up, or 0 when
/// `total` is 0.
///
/// Integer arithmetic only: `floor((200c + t) / 2t)` equals
/// `floor(100c/t + 1/2)`.
pub fn percentage(concluded: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let concluded = concluded.min(total) as u64;
    let total = total as u64;
    ((200 * concluded + total) / (2 * total)) as u8
}

/// Completion figures for a single theme.
///
/// An empty theme scores 0% and is classified red.
pub fn compute_theme_stats(theme: &Theme) -> ThemeStats {
    let porcentagem = percentage(theme.concluded_count(), theme.requirement_count());
    ThemeStats {
        nome: theme.nome.clone(),
        porcentagem,
        cor: ProgressColor::for_percentage(porcentagem),
    }
}

/// One [`ThemeStats`] per theme, in the project's theme order.
pub fn compute_project_stats(project: &Project) -> Vec<ThemeStats> {
    project.temas.iter().map(compute_theme_stats).collect()
}

/// Completion figures over the flattened requirement set.
///
/// This is not the mean of the per-theme percentages: a theme with many
/// requirements weighs more than a theme with few.
pub fn compute_overall_stats(project: &Project) -> OverallStats {
    let total = project.requirement_count();
    let concluded = project.concluded_count();
    let porcentagem = percentage(concluded, total);
    OverallStats {
        total,
        concluded,
        pending: total - concluded,
        porcentagem,
        cor: ProgressColor::for_percentage(porcentagem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conforma_core::{Requirement, RequirementId, RequirementStatus, ThemeId};

    fn requirement(id: usize, concluded: bool) -> Requirement {
        Requirement {
            id: RequirementId::new(format!("r{id}")).unwrap(),
            nome: format!("Requisito {id}"),
            status: if concluded {
                RequirementStatus::Concluido
            } else {
                RequirementStatus::Pendente
            },
            evidencia: if concluded { "ok".into() } else { String::new() },
            data_validade: None,
            anexo: vec![],
            leis_ids: vec![],
        }
    }

    fn theme(name: &str, total: usize, concluded: usize) -> Theme {
        Theme {
            id: ThemeId::new(name).unwrap(),
            nome: name.to_string(),
            requisitos: (0..total).map(|i| requirement(i, i < concluded)).collect(),
        }
    }

    fn project(themes: Vec<Theme>) -> Project {
        Project {
            id: "p1".parse().unwrap(),
            nome: "Projeto".into(),
            temas: themes,
        }
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn empty_theme_is_zero_and_red() {
        let stats = compute_theme_stats(&theme("Vazio", 0, 0));
        assert_eq!(stats.porcentagem, 0);
        assert_eq!(stats.cor, ProgressColor::Red);
    }

    #[test]
    fn two_theme_scenario() {
        let p = project(vec![theme("A", 3, 2), theme("B", 0, 0)]);
        let stats = compute_project_stats(&p);
        assert_eq!(
            stats,
            vec![
                ThemeStats {
                    nome: "A".into(),
                    porcentagem: 67,
                    cor: ProgressColor::Yellow
                },
                ThemeStats {
                    nome: "B".into(),
                    porcentagem: 0,
                    cor: ProgressColor::Red
                },
            ]
        );
    }

    #[test]
    fn theme_order_is_preserved() {
        let p = project(vec![theme("Zeta", 1, 1), theme("Alfa", 1, 0), theme("Meio", 2, 1)]);
        let names: Vec<String> = compute_project_stats(&p).into_iter().map(|s| s.nome).collect();
        assert_eq!(names, vec!["Zeta", "Alfa", "Meio"]);
    }

    #[test]
    fn boundary_colors_through_themes() {
        // 39/100, 40/100, 90/100, 91/100
        for (concluded, expected) in [
            (39, ProgressColor::Red),
            (40, ProgressColor::Yellow),
            (90, ProgressColor::Yellow),
            (91, ProgressColor::Green),
        ] {
            let stats = compute_theme_stats(&theme("T", 100, concluded));
            assert_eq!(stats.porcentagem as usize, concluded);
            assert_eq!(stats.cor, expected, "at {concluded}%");
        }
    }

    #[test]
    fn overall_stats_weigh_by_requirement() {
        // 1/1 and 0/3 → 1/4 = 25%, not the mean of 100% and 0%.
        let p = project(vec![theme("A", 1, 1), theme("B", 3, 0)]);
        let overall = compute_overall_stats(&p);
        assert_eq!(overall.total, 4);
        assert_eq!(overall.concluded, 1);
        assert_eq!(overall.pending, 3);
        assert_eq!(overall.porcentagem, 25);
        assert_eq!(overall.cor, ProgressColor::Red);
    }

    #[test]
    fn recomputing_is_idempotent() {
        let p = project(vec![theme("A", 7, 3), theme("B", 2, 2), theme("C", 0, 0)]);
        assert_eq!(compute_project_stats(&p), compute_project_stats(&p));
        assert_eq!(compute_overall_stats(&p), compute_overall_stats(&p));
    }

    #[test]
    fn overall_stats_of_empty_project() {
        let overall = compute_overall_stats(&project(vec![]));
        assert_eq!(overall.total, 0);
        assert_eq!(overall.porcentagem, 0);
        assert_eq!(overall.cor, ProgressColor::Red);
    }
}
