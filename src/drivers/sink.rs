use crate::drivers::layout::Figure;
use crate::drivers::VizError;
/// Display collaborator. Receives one fully specified figure per renderer run.
pub trait FigureSink {
    fn show(&mut self, figure: &Figure) -> Result<(), VizError>;
}
/// Keeps every submitted figure in memory.
#[cfg(test)]
#[derive(Default)]
pub struct CollectingSink {
    pub figures: Vec<Figure>,
}
#[cfg(test)]
impl FigureSink for CollectingSink {
    fn show(&mut self, figure: &Figure) -> Result<(), VizError> {
        self.figures.push(figure.clone());
        Ok(())
    }
}
