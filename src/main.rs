use dataflow_viz::{demo::PipelineFlow, flow, session::Session};

fn main() -> anyhow::Result<()> {
    flow::run::<Session>(vec![PipelineFlow::constructor()])
}
