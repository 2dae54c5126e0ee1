use crate::error::Result;
use crate::utils::lerp;
use crate::{Dimensions, Module, ModuleRef, check_connected, connected};

// Binary operator applied to the outputs of the left and right inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    Add,
    Multiply,
    Min,
    Max,
    // left raised to the power of right
    Power,
}

impl CombineOp {
    #[inline]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            CombineOp::Add => left + right,
            CombineOp::Multiply => left * right,
            CombineOp::Min => left.min(right),
            CombineOp::Max => left.max(right),
            CombineOp::Power => left.powf(right),
        }
    }
}

// Capability set of a node fed by several inputs
fn common_dimensions<'a>(inputs: impl IntoIterator<Item = &'a Option<ModuleRef>>) -> Dimensions {
    inputs
        .into_iter()
        .flatten()
        .fold(Dimensions::all(), |acc, m| acc & m.dimensions())
}

// Composition of exactly two input modules evaluated at the same coordinate
pub struct Combiner {
    op: CombineOp,
    left: Option<ModuleRef>,
    right: Option<ModuleRef>,
}

impl Combiner {
    pub fn new(op: CombineOp, left: ModuleRef, right: ModuleRef) -> Self {
        Self {
            op,
            left: Some(left),
            right: Some(right),
        }
    }

    // A combiner with no inputs yet; connect both before evaluating
    pub fn unconnected(op: CombineOp) -> Self {
        Self {
            op,
            left: None,
            right: None,
        }
    }

    pub fn op(&self) -> CombineOp {
        self.op
    }

    pub fn left_module(&self) -> Option<&ModuleRef> {
        self.left.as_ref()
    }

    pub fn right_module(&self) -> Option<&ModuleRef> {
        self.right.as_ref()
    }

    pub fn set_left_module(&mut self, module: ModuleRef) {
        self.left = Some(module);
    }

    pub fn set_right_module(&mut self, module: ModuleRef) {
        self.right = Some(module);
    }

    #[inline]
    fn inputs(&self) -> (&ModuleRef, &ModuleRef) {
        (
            connected(&self.left, "combiner"),
            connected(&self.right, "combiner"),
        )
    }
}

impl Module for Combiner {
    fn dimensions(&self) -> Dimensions {
        common_dimensions([&self.left, &self.right])
    }

    fn get1(&self, x: f64) -> f64 {
        let (l, r) = self.inputs();
        self.op.apply(l.get1(x), r.get1(x))
    }

    fn get2(&self, x: f64, y: f64) -> f64 {
        let (l, r) = self.inputs();
        self.op.apply(l.get2(x, y), r.get2(x, y))
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (l, r) = self.inputs();
        self.op.apply(l.get3(x, y, z), r.get3(x, y, z))
    }

    fn get4(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let (l, r) = self.inputs();
        self.op.apply(l.get4(x, y, z, t), r.get4(x, y, z, t))
    }

    fn check_inputs(&self) -> Result<()> {
        check_connected(&self.left, "combiner", "left")?;
        check_connected(&self.right, "combiner", "right")
    }
}

// Blends the left and right inputs by the output of a control module.
// A control value of -1 selects left, +1 selects right.
pub struct Blend {
    left: Option<ModuleRef>,
    right: Option<ModuleRef>,
    control: Option<ModuleRef>,
}

impl Blend {
    pub fn new(left: ModuleRef, right: ModuleRef, control: ModuleRef) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            control: Some(control),
        }
    }

    pub fn left_module(&self) -> Option<&ModuleRef> {
        self.left.as_ref()
    }

    pub fn right_module(&self) -> Option<&ModuleRef> {
        self.right.as_ref()
    }

    pub fn control_module(&self) -> Option<&ModuleRef> {
        self.control.as_ref()
    }

    pub fn set_left_module(&mut self, module: ModuleRef) {
        self.left = Some(module);
    }

    pub fn set_right_module(&mut self, module: ModuleRef) {
        self.right = Some(module);
    }

    pub fn set_control_module(&mut self, module: ModuleRef) {
        self.control = Some(module);
    }

    #[inline]
    fn mix(left: f64, right: f64, control: f64) -> f64 {
        lerp(left, right, (control + 1.0) / 2.0)
    }

    #[inline]
    fn inputs(&self) -> (&ModuleRef, &ModuleRef, &ModuleRef) {
        (
            connected(&self.left, "blend"),
            connected(&self.right, "blend"),
            connected(&self.control, "blend"),
        )
    }
}

impl Module for Blend {
    fn dimensions(&self) -> Dimensions {
        common_dimensions([&self.left, &self.right, &self.control])
    }

    fn get1(&self, x: f64) -> f64 {
        let (l, r, c) = self.inputs();
        Self::mix(l.get1(x), r.get1(x), c.get1(x))
    }

    fn get2(&self, x: f64, y: f64) -> f64 {
        let (l, r, c) = self.inputs();
        Self::mix(l.get2(x, y), r.get2(x, y), c.get2(x, y))
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (l, r, c) = self.inputs();
        Self::mix(l.get3(x, y, z), r.get3(x, y, z), c.get3(x, y, z))
    }

    fn get4(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let (l, r, c) = self.inputs();
        Self::mix(l.get4(x, y, z, t), r.get4(x, y, z, t), c.get4(x, y, z, t))
    }

    fn check_inputs(&self) -> Result<()> {
        check_connected(&self.left, "blend", "left")?;
        check_connected(&self.right, "blend", "right")?;
        check_connected(&self.control, "blend", "control")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Constant;
    use crate::{NoiseError, Perlin, Simplex, module};

    #[test]
    fn operators_combine_both_inputs() {
        let a = module(Constant::new(2.0));
        let b = module(Constant::new(3.0));
        let cases = [
            (CombineOp::Add, 5.0),
            (CombineOp::Multiply, 6.0),
            (CombineOp::Min, 2.0),
            (CombineOp::Max, 3.0),
            (CombineOp::Power, 8.0),
        ];
        for (op, expected) in cases {
            let c = Combiner::new(op, a.clone(), b.clone());
            assert_eq!(c.get1(0.1), expected);
            assert_eq!(c.get2(0.1, 0.2), expected);
            assert_eq!(c.get3(0.1, 0.2, 0.3), expected);
            assert_eq!(c.get4(0.1, 0.2, 0.3, 0.4), expected);
        }
    }

    #[test]
    fn same_coordinate_reaches_both_children() {
        let p = module(Perlin::new(3));
        let c = Combiner::new(CombineOp::Add, p.clone(), p.clone());
        let v = p.get3(0.3, 0.7, 1.1);
        assert!((c.get3(0.3, 0.7, 1.1) - 2.0 * v).abs() < 1e-12);
    }

    #[test]
    fn missing_child_is_reported() {
        let mut c = Combiner::unconnected(CombineOp::Add);
        assert!(matches!(
            c.check_inputs(),
            Err(NoiseError::MissingInput { input: "left", .. })
        ));
        c.set_left_module(module(Constant::new(1.0)));
        assert!(matches!(
            c.check_inputs(),
            Err(NoiseError::MissingInput { input: "right", .. })
        ));
        c.set_right_module(module(Constant::new(1.0)));
        assert!(c.check_inputs().is_ok());
        assert!(c.left_module().is_some() && c.right_module().is_some());
    }

    #[test]
    fn missing_grandchild_is_reported() {
        let inner = module(Combiner::unconnected(CombineOp::Max));
        let outer = Combiner::new(CombineOp::Add, inner, module(Constant::new(0.0)));
        assert!(outer.check_inputs().is_err());
    }

    #[test]
    #[should_panic]
    fn evaluating_unconnected_combiner_panics() {
        let c = Combiner::unconnected(CombineOp::Min);
        let _ = c.get3(0.0, 0.0, 0.0);
    }

    #[test]
    fn dimensions_are_intersected() {
        let c = Combiner::new(
            CombineOp::Add,
            module(Perlin::new(0)),
            module(Simplex::new(0)),
        );
        assert_eq!(c.dimensions(), Dimensions::D2);
    }

    #[test]
    fn blend_follows_control() {
        let lo = module(Constant::new(-1.0));
        let hi = module(Constant::new(1.0));
        let at = |c: f64| {
            Blend::new(lo.clone(), hi.clone(), module(Constant::new(c))).get3(0.0, 0.0, 0.0)
        };
        assert_eq!(at(-1.0), -1.0);
        assert_eq!(at(1.0), 1.0);
        assert_eq!(at(0.0), 0.0);
    }
}
