pub mod configuration;

pub mod compensation {
    pub mod targettones;
    pub mod compensationreport;
    pub mod continuouscompensation;
}

pub mod engine {
    pub mod samplepoint;
    pub mod curveengine;
    pub mod curvecache;
}

pub mod export {
    pub mod curveexport;
}

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod piecewiselinear;
        }
    }
    pub mod round;
}

pub mod tvi {
    pub mod profileerror;
    pub mod tviprofile;
    pub mod tvipreset;
    pub mod customprofile;
    pub mod profilemanager;
    pub mod profilecomparison;
}
