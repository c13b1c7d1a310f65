use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "fleetview",
    version,
    about = "trucking-company JSON feed renderer",
    long_about = "Fleetview fetches a JSON document describing trucking companies and renders it as an HTML table.\n\nExamples:\n  fleetview https://example.com/truckinglist.json\n  fleetview truckinglist.json -o companies.html\n  fleetview --serve --data-dir ./data\n\nTip: Use --config to persist settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        value_name = "INPUT",
        help_heading = "Input",
        help = "JSON URL or filename to render."
    )]
    pub input: Option<String>,

    #[arg(
        short = 'e',
        long = "ep",
        visible_alias = "endpoint",
        value_name = "URL",
        help_heading = "Input",
        help = "Server endpoint a bare filename is sent to as ?file=<name>."
    )]
    pub endpoint: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.fleetview/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered document to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (html, json, text)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'H',
        long = "hdr",
        visible_alias = "header",
        value_name = "HEADER",
        help_heading = "HTTP",
        help = "Add a header to the request (format: 'Key: Value')."
    )]
    pub header: Option<String>,

    #[arg(
        short = 'S',
        long = "serve",
        help_heading = "Server",
        help = "Run the rendering server instead of fetching."
    )]
    pub serve: bool,

    #[arg(
        short = 'l',
        long = "ls",
        visible_alias = "listen",
        value_name = "ADDR",
        help_heading = "Server",
        help = "Listen address for --serve (host:port)."
    )]
    pub listen: Option<String>,

    #[arg(
        short = 'd',
        long = "dd",
        visible_alias = "data-dir",
        value_name = "DIR",
        help_heading = "Server",
        help = "Directory the server reads JSON files from."
    )]
    pub data_dir: Option<String>,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,
}
