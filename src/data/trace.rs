/// Points visited by a minimization run, starting with the seed point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IterationTrace {
    points: Vec<[f64; 2]>,
}

impl IterationTrace {
    pub fn seeded(start: [f64; 2]) -> Self {
        Self {
            points: vec![start],
        }
    }

    pub fn push(&mut self, p: [f64; 2]) {
        self.points.push(p);
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }
}
