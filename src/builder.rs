// Pattern 2: Builder
// The director owns the assembly and drives the steps; builders only know their parts.

use std::fmt;

use crate::error::{PatternError, Result};
use crate::sink::DisplaySink;

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    vehicle_type: String,
    parts: Vec<String>,
}

impl Vehicle {
    pub fn new(vehicle_type: impl Into<String>) -> Self {
        Self {
            vehicle_type: vehicle_type.into(),
            parts: Vec::new(),
        }
    }

    pub fn vehicle_type(&self) -> &str {
        &self.vehicle_type
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    // Parts are append-only.
    pub fn add_part(&mut self, part: impl Into<String>) {
        self.parts.push(part.into());
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "Car of type {} has part {}.", self.vehicle_type, part)?;
        }
        Ok(())
    }
}

// ============================================================================
// Builders
// ============================================================================

pub trait VehicleBuilder {
    fn vehicle_type(&self) -> &'static str;
    fn build_engine(&self, vehicle: &mut Vehicle);
    fn build_frame(&self, vehicle: &mut Vehicle);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MiniBuilder;
impl VehicleBuilder for MiniBuilder {
    fn vehicle_type(&self) -> &'static str {
        "Mini"
    }

    fn build_engine(&self, vehicle: &mut Vehicle) {
        vehicle.add_part("'not a V8'");
    }

    fn build_frame(&self, vehicle: &mut Vehicle) {
        vehicle.add_part("'3-door with stripes'");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BmwBuilder;
impl VehicleBuilder for BmwBuilder {
    fn vehicle_type(&self) -> &'static str {
        "BMW"
    }

    fn build_engine(&self, vehicle: &mut Vehicle) {
        vehicle.add_part("'a fancy V8 engine'");
    }

    fn build_frame(&self, vehicle: &mut Vehicle) {
        vehicle.add_part("'5-door with metallic finish'");
    }
}

pub fn builder_for(selector: &str) -> Result<Box<dyn VehicleBuilder>> {
    let selector = selector.trim();
    if selector.eq_ignore_ascii_case("mini") {
        Ok(Box::new(MiniBuilder))
    } else if selector.eq_ignore_ascii_case("bmw") {
        Ok(Box::new(BmwBuilder))
    } else {
        Err(PatternError::unsupported_builder(selector))
    }
}

// ============================================================================
// Assembly state machine
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Created,
    EngineBuilt,
    FrameBuilt,
    Done,
}

/// One build in progress: the vehicle plus how far along it is.
pub struct Assembly<'b> {
    builder: &'b dyn VehicleBuilder,
    vehicle: Vehicle,
    stage: BuildStage,
}

impl fmt::Debug for Assembly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assembly")
            .field("builder", &self.builder.vehicle_type())
            .field("vehicle", &self.vehicle)
            .field("stage", &self.stage)
            .finish()
    }
}

impl<'b> Assembly<'b> {
    pub fn new(builder: &'b dyn VehicleBuilder) -> Self {
        Self {
            builder,
            vehicle: Vehicle::new(builder.vehicle_type()),
            stage: BuildStage::Created,
        }
    }

    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    pub fn build_engine(&mut self) -> Result<()> {
        self.advance(BuildStage::Created, "engine")?;
        self.builder.build_engine(&mut self.vehicle);
        self.stage = BuildStage::EngineBuilt;
        Ok(())
    }

    pub fn build_frame(&mut self) -> Result<()> {
        self.advance(BuildStage::EngineBuilt, "frame")?;
        self.builder.build_frame(&mut self.vehicle);
        self.stage = BuildStage::FrameBuilt;
        Ok(())
    }

    /// Hands over the vehicle once every step has run.
    pub fn finish(mut self) -> Result<Vehicle> {
        self.advance(BuildStage::FrameBuilt, "finish")?;
        self.stage = BuildStage::Done;
        Ok(self.vehicle)
    }

    fn advance(&self, required: BuildStage, attempted: &'static str) -> Result<()> {
        if self.stage == required {
            tracing::debug!(vehicle = self.vehicle.vehicle_type(), step = attempted, "build step");
            return Ok(());
        }

        let expected = match self.stage {
            BuildStage::Created => "engine",
            BuildStage::EngineBuilt => "frame",
            BuildStage::FrameBuilt => "finish",
            BuildStage::Done => "nothing",
        };
        tracing::warn!(stage = ?self.stage, attempted, "rejected out-of-order build step");
        Err(PatternError::BuildSequence {
            stage: self.stage,
            expected,
            attempted,
        })
    }
}

// ============================================================================
// Director
// ============================================================================

#[derive(Debug, Default)]
pub struct Garage {
    vehicle: Option<Vehicle>,
}

impl Garage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn construct(&mut self, builder: &dyn VehicleBuilder) -> Result<&Vehicle> {
        let mut assembly = Assembly::new(builder);
        assembly.build_engine()?;
        assembly.build_frame()?;
        let vehicle: &Vehicle = self.vehicle.insert(assembly.finish()?);
        Ok(vehicle)
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    /// Writes nothing until a vehicle has been constructed.
    pub fn show(&self, sink: &dyn DisplaySink) {
        if let Some(vehicle) = &self.vehicle {
            sink.write(&vehicle.to_string());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
