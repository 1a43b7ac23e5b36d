use super::*;

#[test]
fn coefficient_matrix_rejects_ragged_and_empty_rows() {
    assert!(matches!(
        CoefficientMatrix::new(vec![vec![0, 1], vec![1]]),
        Err(CosmatesqueError::Parameter(_))
    ));
    assert!(matches!(
        CoefficientMatrix::new(vec![vec![0, 1, 2], vec![1, 0, 2]]),
        Err(CosmatesqueError::Parameter(_))
    ));
    assert!(matches!(
        CoefficientMatrix::new(vec![]),
        Err(CosmatesqueError::Parameter(_))
    ));
}

#[test]
fn coefficient_matrix_accessors() {
    let m = CoefficientMatrix::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();
    assert_eq!(m.reach(), 3);
    assert_eq!(m.offset(), 2);
    assert_eq!(m.get(1, 2), 6);
    assert_eq!(m.self_coefficient(), 9);
    assert_eq!(m.cursor_rows(), vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]);
    assert_eq!(m.reduced(4).unwrap().to_rows()[2], vec![3, 0, 1]);
    assert!(m.reduced(1).is_err());
}

#[test]
fn cursor_rows_fill_self_cell_with_zero() {
    let m = CoefficientMatrix::from_cursor_rows(vec![vec![0, 1], vec![1]]).unwrap();
    assert_eq!(m.to_rows(), vec![vec![0, 1], vec![1, 0]]);

    let single = CoefficientMatrix::from_cursor_rows(vec![vec![]]).unwrap();
    assert_eq!(single.to_rows(), vec![vec![0]]);

    assert!(CoefficientMatrix::from_cursor_rows(vec![vec![0, 1], vec![1, 0]]).is_err());
}

#[test]
fn parses_text_forms() {
    let full: CoefficientMatrix = "0,1;1,0".parse().unwrap();
    let cursor: CoefficientMatrix = " 0, 1 ; 1 ".parse().unwrap();
    let listed: CoefficientMatrix = "[[0, 1], [1]]".parse().unwrap();
    assert_eq!(full, cursor);
    assert_eq!(full, listed);
    assert_eq!(full.to_string(), "0,1;1,0");

    assert!("0,1;1,0,1".parse::<CoefficientMatrix>().is_err());
    assert!("0,x;1,0".parse::<CoefficientMatrix>().is_err());
    assert!("[]".parse::<CoefficientMatrix>().is_err());
    for blank in ["", "   "] {
        let err = blank.parse::<CoefficientMatrix>().unwrap_err();
        assert!(matches!(err, CosmatesqueError::Parameter(_)), "{blank:?}: {err}");
    }
}

#[test]
fn coefficient_matrix_serde_validates() {
    let m: CoefficientMatrix = serde_json::from_str("[[0,1],[1,0]]").unwrap();
    assert_eq!(serde_json::to_string(&m).unwrap(), "[[0,1],[1,0]]");
    assert!(serde_json::from_str::<CoefficientMatrix>("[[0,1],[1]]").is_err());
}

#[test]
fn residue_matrix_from_rows_validates() {
    let r = ResidueMatrix::from_rows(vec![vec![1, 1], vec![1, 0]], 2).unwrap();
    assert_eq!(r.size(), 2);
    assert_eq!(r.get(1, 0), 1);
    assert_eq!(r.get(1, 1), 0);
    assert_eq!(r.row(1), &[1, 0]);
    assert_eq!(r.as_slice(), &[1, 1, 1, 0]);

    assert!(matches!(
        ResidueMatrix::from_rows(vec![vec![2]], 2),
        Err(CosmatesqueError::Parameter(_))
    ));
    assert!(matches!(
        ResidueMatrix::from_rows(vec![vec![0, 1]], 2),
        Err(CosmatesqueError::Size(_))
    ));
    assert!(matches!(
        ResidueMatrix::from_rows(vec![], 2),
        Err(CosmatesqueError::Size(_))
    ));
    assert!(ResidueMatrix::from_rows(vec![vec![0]], 1).is_err());
}
