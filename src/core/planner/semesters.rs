//! Semester board: courses grouped into columns by planned semester

use crate::core::models::Ramo;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Identifier of a course card on the board
///
/// `CodSigla`, else `CodLista`, else a synthetic id built from the semester,
/// the card position and the course name.
#[must_use]
pub fn board_id(ramo: &Ramo, semestre: u32, index: usize) -> String {
    ramo.id().map_or_else(
        || {
            format!(
                "ramo-{semestre}-{index}-{}",
                WHITESPACE.replace_all(&ramo.nombre, "-")
            )
        },
        str::to_string,
    )
}

/// One semester column
#[derive(Debug, Clone, Serialize)]
pub struct SemesterColumn<'a> {
    /// Semester number
    pub semestre: u32,
    /// Total credits in the column
    pub creditos: f64,
    /// Courses ordered by `OrdenSemestre`
    pub ramos: Vec<&'a Ramo>,
}

/// Courses of a plan arranged by semester
///
/// The course list is the source of truth; columns are derived on demand so a
/// move is just a change of `SemestreBloque`.
#[derive(Debug, Clone, Default)]
pub struct SemesterBoard {
    ramos: Vec<Ramo>,
}

impl SemesterBoard {
    /// Build a board from a plan's courses
    #[must_use]
    pub const fn from_ramos(ramos: Vec<Ramo>) -> Self {
        Self { ramos }
    }

    /// Semester -> course indices (sorted), plus indices of courses without a semester
    fn grouped_indices(&self) -> (BTreeMap<u32, Vec<usize>>, Vec<usize>) {
        let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        let mut unscheduled = Vec::new();

        for (idx, ramo) in self.ramos.iter().enumerate() {
            match ramo.semester() {
                Some(sem) => groups.entry(sem).or_default().push(idx),
                None => unscheduled.push(idx),
            }
        }

        for indices in groups.values_mut() {
            // stable: equal or missing orders keep plan order, missing sorts last
            indices.sort_by(|&a, &b| match (self.ramos[a].order(), self.ramos[b].order()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }

        (groups, unscheduled)
    }

    /// Semester columns in ascending semester order
    #[must_use]
    pub fn columns(&self) -> Vec<SemesterColumn<'_>> {
        let (groups, _) = self.grouped_indices();
        groups
            .into_iter()
            .map(|(semestre, indices)| {
                let ramos: Vec<&Ramo> = indices.into_iter().map(|i| &self.ramos[i]).collect();
                let creditos = ramos.iter().map(|r| r.credits()).sum();
                SemesterColumn {
                    semestre,
                    creditos,
                    ramos,
                }
            })
            .collect()
    }

    /// Courses with no usable planned semester, in plan order
    #[must_use]
    pub fn unscheduled(&self) -> Vec<&Ramo> {
        self.ramos.iter().filter(|r| r.semester().is_none()).collect()
    }

    /// Total credits across the whole plan
    #[must_use]
    pub fn total_credits(&self) -> f64 {
        self.ramos.iter().map(Ramo::credits).sum()
    }

    /// Index in `ramos` of the card with this board id
    fn position_of(&self, id: &str) -> Option<usize> {
        let (groups, unscheduled) = self.grouped_indices();
        groups
            .iter()
            .flat_map(|(&sem, indices)| {
                indices
                    .iter()
                    .enumerate()
                    .map(move |(pos, &idx)| (sem, pos, idx))
            })
            .chain(unscheduled.iter().enumerate().map(|(pos, &idx)| (0, pos, idx)))
            .find(|&(sem, pos, idx)| board_id(&self.ramos[idx], sem, pos) == id)
            .map(|(_, _, idx)| idx)
    }

    /// Move a course card to another semester
    ///
    /// Returns `false` if no card has that id.
    pub fn move_course(&mut self, id: &str, semestre: u32) -> bool {
        match self.position_of(id) {
            Some(idx) => {
                self.ramos[idx].set_semester(semestre);
                true
            }
            None => false,
        }
    }
}
