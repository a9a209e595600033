use super::*;

fn matrix() -> AntigenMatrix {
    AntigenMatrix {
        antigens: vec!["Spike".to_string(), "Core".to_string()],
        positive: vec![34, 12],
        negative: vec![66, 3],
    }
}

#[test]
fn test_transpose_one_row_per_antigen() {
    let out = run_stage4(&matrix());
    assert_eq!(out.len(), 2);
    assert_eq!(
        out[0],
        AntigenTally {
            antigen: "Spike".to_string(),
            positive: 34,
            negative: 66,
        }
    );
    assert_eq!(out[1].antigen, "Core");
    assert_eq!(out[1].positive, 12);
    assert_eq!(out[1].negative, 3);
}

#[test]
fn test_totals_match_tested_counts() {
    let out = run_stage4(&matrix());
    assert_eq!(out[0].total(), 100);
    assert_eq!(out[1].total(), 15);
}

#[test]
fn test_preserves_column_order() {
    let out = run_stage4(&matrix());
    let names: Vec<&str> = out.iter().map(|t| t.antigen.as_str()).collect();
    assert_eq!(names, vec!["Spike", "Core"]);
}

#[test]
fn test_empty_matrix() {
    let out = run_stage4(&AntigenMatrix {
        antigens: Vec::new(),
        positive: Vec::new(),
        negative: Vec::new(),
    });
    assert!(out.is_empty());
}
